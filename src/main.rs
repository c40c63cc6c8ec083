use esim_launcher::{
    app::App, cli::Arguments, config::LauncherConfig, host::native::Native, prompt::Terminal,
    runtime::docker::DockerCli,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .without_time()
        .with_target(false)
        .init();

    // no arguments at all means the menu
    let interactive = std::env::args_os().len() == 1;
    let args: Arguments = argh::from_env();

    let code = match run(args, interactive) {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            1
        }
    };

    std::process::exit(code);
}

fn run(args: Arguments, interactive: bool) -> anyhow::Result<i32> {
    let config = LauncherConfig::load()?;

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let code = rt.block_on(async move {
        // everything blocks (stdin, the container), so keep it off the runtime
        let session = tokio::task::spawn_blocking(move || {
            let runtime = DockerCli::new(&config.runtime);
            let mut app = App::new(config, runtime, Native, Terminal);

            if interactive {
                app.run_menu()
            } else {
                app.run_direct(&args)
            }
        });

        tokio::select! {
            result = session => Ok::<_, anyhow::Error>(result??),
            _ = tokio::signal::ctrl_c() => {
                println!("\n");
                info!("Cancelled");
                Ok(0)
            }
        }
    });

    // the blocking session may still be parked on stdin
    rt.shutdown_background();
    code
}
