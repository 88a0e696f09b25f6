use std::ffi::OsString;

use clap::{App, ErrorKind};

use crate::scene::Variant;

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub variant: Variant,
    pub list: bool,
    pub verbosity: u64,
}

impl Config {
    /// Default log filter for the number of `-v`s given.
    pub fn log_level(&self) -> &'static str {
        match self.verbosity {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

pub fn parse_args<I, T>(args: I) -> Result<Config, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let yaml = load_yaml!("cli.yaml");

    let matches = App::from_yaml(yaml).get_matches_from_safe(args)?;

    let variant = match matches.value_of("variant") {
        Some(name) => name
            .parse::<Variant>()
            .map_err(|e| clap::Error::with_description(&e, ErrorKind::InvalidValue))?,
        None => Variant::default(),
    };

    Ok(Config {
        variant,
        list: matches.is_present("list"),
        verbosity: matches.occurrences_of("verbose"),
    })
}

/// One line per scene, for `--list`.
pub fn variant_listing() -> String {
    Variant::ALL
        .iter()
        .map(|v| format!("{:<14}{}", v.name(), v.description()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn no_arguments_draws_the_indexed_scene() {
        let config = parse_args(vec!["glhello"]).unwrap();

        assert_eq!(config, Config { variant: Variant::Indexed, list: false, verbosity: 0 });
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn variant_and_verbosity_are_read() {
        let config = parse_args(vec!["glhello", "--variant", "two-programs", "-vv"]).unwrap();

        assert_eq!(config.variant, Variant::TwoPrograms);
        assert_eq!(config.verbosity, 2);
        assert_eq!(config.log_level(), "trace");
    }

    #[test]
    fn unknown_variant_is_refused() {
        let err = parse_args(vec!["glhello", "--variant", "square"]).unwrap_err();

        assert_eq!(err.kind, ErrorKind::InvalidValue);
        assert!(err.message.contains("unknown variant \"square\""), "{}", err.message);
    }

    #[test]
    fn every_variant_name_is_accepted() {
        for variant in Variant::ALL.iter() {
            let config = parse_args(vec!["glhello", "--variant", variant.name()]).unwrap();
            assert_eq!(config.variant, *variant);
        }
    }

    #[test]
    fn listing_has_a_line_per_variant() {
        let listing = variant_listing();

        assert_eq!(listing.lines().count(), Variant::ALL.len());
        assert!(listing.lines().any(|l| l.starts_with("two-programs")));
    }
}
