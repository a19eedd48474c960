use std::ffi::OsString;
use std::path::PathBuf;

pub use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about = "Browse a food product catalog in the terminal", long_about = None)]
struct ClapArgs {
    /// Profile name
    /// Section of the profile file to read settings from. Default is 'default'.
    /// A missing profile falls back to built-in defaults.
    #[clap(short = 'p', long, default_value = "default", help = "profile name")]
    profile: String,

    #[clap(short = 'v', long, help = "log debug output")]
    verbose: bool,

    /// Overrides `base_url` from the profile
    #[clap(long, help = "catalog API base URL")]
    base_url: Option<String>,

    /// Overrides `log_file` from the profile
    #[clap(long, help = "write logs to this file")]
    log_file: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct CommandLineArgs {
    profile: String,
    verbose: bool,
    base_url: Option<String>,
    log_file: Option<PathBuf>,
}

impl From<ClapArgs> for CommandLineArgs {
    fn from(args: ClapArgs) -> Self {
        Self {
            profile: args.profile,
            verbose: args.verbose,
            base_url: args.base_url,
            log_file: args.log_file,
        }
    }
}

impl CommandLineArgs {
    pub fn parse() -> Self {
        ClapArgs::parse().into()
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        ClapArgs::parse_from(itr).into()
    }

    pub fn profile(&self) -> &str {
        &self.profile
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    pub fn log_file(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_args_profile_only() {
        let args = CommandLineArgs::parse_from(["pantry", "--profile", "test"]);
        assert_eq!(args.profile(), "test");
        assert!(!args.verbose());
    }

    #[test]
    fn test_parse_args_short_flags() {
        let args = CommandLineArgs::parse_from(["pantry", "-p", "dev", "-v"]);
        assert_eq!(args.profile(), "dev");
        assert!(args.verbose());
    }

    #[test]
    fn test_parse_args_overrides() {
        let args = CommandLineArgs::parse_from([
            "pantry",
            "--base-url",
            "https://catalog.example.com/api",
            "--log-file",
            "/tmp/pantry.log",
        ]);
        assert_eq!(args.base_url(), Some("https://catalog.example.com/api"));
        assert_eq!(args.log_file(), Some(&PathBuf::from("/tmp/pantry.log")));
    }

    #[test]
    fn test_default_values() {
        let args = CommandLineArgs::parse_from(["pantry"]);
        assert_eq!(args.profile(), "default");
        assert_eq!(args.base_url(), None);
        assert_eq!(args.log_file(), None);
    }
}
