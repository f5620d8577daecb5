use core::ffi::CStr;

use queso_user_lib::{print, println, process};

/// One named test.
///
/// The body runs in a freshly spawned child, so it may panic freely;
/// the runner only observes the child's exit status.
pub struct TestEntry {
    pub name: &'static CStr,
    pub test: fn(),
}

impl TestEntry {
    #[must_use]
    pub fn name_str(&self) -> &'static str {
        self.name.to_str().unwrap_or("<non-utf8>")
    }

    /// Re-executes `self_name` with `run <name>` and reports PASS or
    /// FAIL from the child's exit status.
    pub fn run(&self, self_name: &CStr) -> bool {
        print!("{name:<24} ", name = self.name_str());
        let child = match process::spawn(self_name, &[c"run", self.name]) {
            Ok(child) => child,
            Err(e) => {
                println!("FAIL launch: {e}");
                return false;
            }
        };
        match child.join() {
            Ok(status) if status.success() => {
                println!("PASS");
                true
            }
            Ok(status) => {
                println!("FAIL {status}");
                false
            }
            Err(e) => {
                println!("FAIL join: {e}");
                false
            }
        }
    }
}

/// How often the suite repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuous {
    Once,
    UntilFailure,
    Forever,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UsageError {
    #[error("unknown flag `{0}`")]
    UnknownFlag(&'static str),
    #[error("more than one test name given")]
    ExtraName,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    pub filter: Option<&'static str>,
    pub continuous: Continuous,
    pub halt_after: bool,
}

impl RunConfig {
    pub fn parse_from<I>(args: I) -> Result<Self, UsageError>
    where
        I: IntoIterator<Item = &'static str>,
    {
        let mut config = Self {
            filter: None,
            continuous: Continuous::Once,
            halt_after: false,
        };
        for arg in args {
            match arg {
                "-c" => config.continuous = Continuous::UntilFailure,
                "-C" => config.continuous = Continuous::Forever,
                "-T" => config.halt_after = true,
                name if name.starts_with('-') => return Err(UsageError::UnknownFlag(name)),
                name => {
                    if config.filter.is_some() {
                        return Err(UsageError::ExtraName);
                    }
                    config.filter = Some(name);
                }
            }
        }
        Ok(config)
    }

    #[must_use]
    pub fn selects(&self, entry: &TestEntry) -> bool {
        self.filter.is_none_or(|name| entry.name_str() == name)
    }
}

/// Runs every selected test, repeating per the config. Returns `true`
/// when the final round had no failures.
pub fn run_suite(self_name: &CStr, tests: &[TestEntry], config: &RunConfig) -> bool {
    let mut round = 0_u32;
    loop {
        round += 1;
        if config.continuous != Continuous::Once {
            println!("-- round {round} --");
        }
        let mut failed = 0_u32;
        for entry in tests {
            if !config.selects(entry) {
                continue;
            }
            if !entry.run(self_name) {
                failed += 1;
            }
        }
        match config.continuous {
            Continuous::Once => return failed == 0,
            Continuous::UntilFailure if failed > 0 => return false,
            Continuous::UntilFailure | Continuous::Forever => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop() {}

    #[test]
    fn test_defaults_run_everything_once() {
        let config = RunConfig::parse_from([]).unwrap();
        assert_eq!(config.filter, None);
        assert_eq!(config.continuous, Continuous::Once);
        assert!(!config.halt_after);
    }

    #[test]
    fn test_flags_select_repeat_modes() {
        let config = RunConfig::parse_from(["-c"]).unwrap();
        assert_eq!(config.continuous, Continuous::UntilFailure);

        let config = RunConfig::parse_from(["-C", "-T"]).unwrap();
        assert_eq!(config.continuous, Continuous::Forever);
        assert!(config.halt_after);
    }

    #[test]
    fn test_name_sets_filter() {
        let config = RunConfig::parse_from(["exec_missing"]).unwrap();
        assert_eq!(config.filter, Some("exec_missing"));

        let selected = TestEntry {
            name: c"exec_missing",
            test: noop,
        };
        let skipped = TestEntry {
            name: c"join_twice",
            test: noop,
        };
        assert!(config.selects(&selected));
        assert!(!config.selects(&skipped));
    }

    #[test]
    fn test_unknown_flag_is_an_error() {
        assert_eq!(
            RunConfig::parse_from(["-x"]),
            Err(UsageError::UnknownFlag("-x"))
        );
    }

    #[test]
    fn test_second_name_is_an_error() {
        assert_eq!(
            RunConfig::parse_from(["alpha", "beta"]),
            Err(UsageError::ExtraName)
        );
    }
}
