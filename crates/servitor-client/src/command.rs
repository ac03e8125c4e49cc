use std::io;

use crate::Manager;

/// Administrative verbs accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Command {
    Install,
    Uninstall,
    Create,
    Delete,
    Start,
    Stop,
}

impl Command {
    pub fn execute(self, manager: &dyn Manager) -> io::Result<()> {
        match self {
            Self::Install => manager.install(),
            Self::Uninstall => manager.uninstall(),
            Self::Create => manager.create(),
            Self::Delete => manager.delete(),
            Self::Start => manager.start(),
            Self::Stop => manager.stop(),
        }
    }

    pub fn usage(program: &str) -> String {
        format!("usage: {program} [install|uninstall|create|delete|start|stop]")
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn verbs_parse_lowercase() {
        assert_eq!(Command::from_str("install").unwrap(), Command::Install);
        assert_eq!(Command::from_str("stop").unwrap(), Command::Stop);
        assert!(Command::from_str("frobnicate").is_err());
        assert!(Command::from_str("Install").is_err());
    }

    #[test]
    fn verbs_display_lowercase() {
        assert_eq!(Command::Uninstall.to_string(), "uninstall");
    }
}
