use anyhow::Context;
use anyhow::bail;

use crate::pattern::Pattern;

/// Settings of the console driver, read from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Name of the seed pattern
    pub pattern: String,

    /// Side of the grid the pattern is centered in. `None` keeps the pattern's own size.
    pub size: Option<usize>,

    /// Print this many generations and exit instead of waiting for key presses
    pub steps: Option<u64>,

    /// Draw with braille characters instead of `O` and `.`
    pub braille: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pattern: "line5".to_string(),
            size: None,
            steps: None,
            braille: false,
        }
    }
}

pub const USAGE: &str =
    "usage: quadlife [--pattern <block|blinker|glider|line5|r-pentomino>] [--size <n>] [--steps <n>] [--braille]";

impl Config {
    /// Parse arguments, not including the program name
    pub fn from_args<I>(args: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Config::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--pattern" | "-p" => {
                    config.pattern = args.next().context("--pattern expects a name")?;
                }
                "--size" | "-s" => {
                    let size = args.next().context("--size expects a number")?;
                    let size: usize = size
                        .parse()
                        .with_context(|| format!("Invalid size \"{size}\""))?;

                    if !size.is_power_of_two() {
                        bail!("size must be a power of two, got {size}");
                    }

                    config.size = Some(size);
                }
                "--steps" | "-n" => {
                    let steps = args.next().context("--steps expects a number")?;
                    let steps = steps
                        .parse()
                        .with_context(|| format!("Invalid number of steps \"{steps}\""))?;

                    config.steps = Some(steps);
                }
                "--braille" | "-b" => config.braille = true,
                other => bail!("unexpected argument \"{other}\"\n{USAGE}"),
            }
        }

        Ok(config)
    }

    /// The seed described by this config
    pub fn seed(&self) -> anyhow::Result<Pattern> {
        let pattern: Pattern = self
            .pattern
            .parse()
            .context("Failed to load the seed pattern")?;

        match self.size {
            Some(side) => Ok(pattern
                .centered_in(side)
                .context("Failed to center the seed pattern")?),
            None => Ok(pattern),
        }
    }
}

#[cfg(test)]
mod test {
    use super::Config;

    fn args(s: &str) -> Vec<String> {
        s.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn defaults() {
        let config = Config::from_args(args("")).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.seed().unwrap().width(), 8);
    }

    #[test]
    fn all_flags() {
        let config = Config::from_args(args("-p glider --size 16 --steps 4 -b")).unwrap();

        assert_eq!(
            config,
            Config {
                pattern: "glider".to_string(),
                size: Some(16),
                steps: Some(4),
                braille: true,
            }
        );
        assert_eq!(config.seed().unwrap().width(), 16);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(Config::from_args(args("--size 12")).is_err());
        assert!(Config::from_args(args("--steps many")).is_err());
        assert!(Config::from_args(args("--steps")).is_err());
        assert!(Config::from_args(args("--wrap")).is_err());

        let config = Config::from_args(args("--pattern nope")).unwrap();
        assert!(config.seed().is_err());
    }
}
