#[derive(argh::FromArgs, Debug, Default, Clone, Copy, PartialEq, Eq)]
/// Run eSim in a container, in the browser (VNC) or as native windows (X11).
/// Without options an interactive menu is shown.
pub struct Arguments {
    #[argh(switch, short = 'v')]
    /// VNC mode in the browser (default)
    pub vnc: bool,

    #[argh(switch, short = 'x')]
    /// X11 mode, native windows
    pub x11: bool,

    #[argh(switch, short = 'b')]
    /// build the image from the Dockerfile
    pub build: bool,

    #[argh(switch, short = 'p')]
    /// pull the image before starting
    pub pull: bool,

    #[argh(switch, short = 's')]
    /// open a shell in the container instead
    pub shell: bool,
}

/// Entries of the interactive menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString)]
pub enum MenuChoice {
    #[strum(serialize = "1")]
    Vnc,
    #[strum(serialize = "2")]
    X11,
    #[strum(serialize = "3")]
    UpdateImage,
    #[strum(serialize = "4")]
    Build,
    #[strum(serialize = "0")]
    Exit,
}
