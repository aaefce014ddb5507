use std::{
    io::{self, BufRead},
    path::{Path, PathBuf},
};

mod terminal;

use anyhow::Context;
use clap::ArgAction;
use larder::{Calendar, Clock, Config, Food, SystemClock, domain::date, storage};
use regex::Regex;
use terminal::Colorize;
use tracing::instrument;

/// Name of the configuration file looked up in the working directory.
const CONFIG_FILE: &str = "larder.toml";

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The path of the calendar data file (defaults to the configured one)
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let file = self.file.unwrap_or_else(|| load_config().data_file);
        self.command
            .unwrap_or(Command::Report(Report {}))
            .run(&file)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

fn load_config() -> Config {
    let path = Path::new(CONFIG_FILE);
    Config::load(path).unwrap_or_else(|e| {
        tracing::debug!("Failed to load config: {e}");
        Config::default()
    })
}

/// Loads the calendar from `file`, treating a missing file as empty.
///
/// Any other load failure aborts the command, leaving the file untouched.
fn load_or_empty(file: &Path) -> anyhow::Result<Calendar> {
    match storage::load(file) {
        Ok(calendar) => Ok(calendar),
        Err(storage::LoadError::NotFound(_)) => Ok(Calendar::new()),
        Err(error) => Err(error.into()),
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Write a default configuration file
    Init,

    /// Add a food to the calendar
    Add(Add),

    /// Remove the first food with the given name
    Remove(Remove),

    /// Show the expiry date of a named food
    Check(Check),

    /// Show a named food with its expiry status
    Status(Status),

    /// List foods expiring within a number of days
    Expiring(Expiring),

    /// Show all foods grouped by expiry status (default)
    Report(Report),

    /// List all foods in insertion order
    List(List),

    /// Remove every food from the calendar
    Clear(Clear),
}

impl Command {
    fn run(self, file: &Path) -> anyhow::Result<()> {
        match self {
            Self::Init => Init::run(),
            Self::Add(command) => command.run(file),
            Self::Remove(command) => command.run(file),
            Self::Check(command) => command.run(file),
            Self::Status(command) => command.run(file),
            Self::Expiring(command) => command.run(file),
            Self::Report(command) => command.run(file),
            Self::List(command) => command.run(file),
            Self::Clear(command) => command.run(file),
        }
    }
}

#[derive(Debug, clap::Parser)]
pub struct Init {}

impl Init {
    #[instrument]
    fn run() -> anyhow::Result<()> {
        let config_path = Path::new(CONFIG_FILE);
        if config_path.exists() {
            anyhow::bail!("Already initialized (found existing {CONFIG_FILE})");
        }

        let config = Config::default();
        config
            .save(config_path)
            .map_err(|e| anyhow::anyhow!("Failed to create {CONFIG_FILE}: {e}"))?;

        println!("Initialized expiry calendar configuration");
        println!("  Created: {CONFIG_FILE}");
        println!("  Data file: {}", config.data_file.display());

        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct Add {
    /// Name of the food to add
    name: String,

    /// Expiry date (YYYY/MM/DD)
    #[clap(long, short)]
    expires: String,

    /// Date purchased (YYYY/MM/DD)
    #[clap(long, short)]
    purchased: String,
}

impl Add {
    #[instrument]
    fn run(self, file: &Path) -> anyhow::Result<()> {
        let food = Food::new(self.name, &self.expires, &self.purchased)?;

        // The record itself does not enforce the ordering of its dates;
        // that check belongs here, at the boundary.
        if food.expiry_date() <= food.date_purchased() {
            anyhow::bail!("Expiry date must be after the date purchased");
        }

        let mut calendar = load_or_empty(file)?;
        calendar.add(food);
        storage::save(file, &calendar)?;

        println!("{}", "Successfully added".success());
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct Remove {
    /// Name of the food to remove
    name: String,
}

impl Remove {
    #[instrument]
    fn run(self, file: &Path) -> anyhow::Result<()> {
        let mut calendar = load_or_empty(file)?;

        if calendar.remove_by_name(&self.name) {
            storage::save(file, &calendar)?;
            println!(
                "{}",
                format!("Successfully removed {}", self.name).success()
            );
        } else {
            println!("{}", "Could not find named food".warning());
        }

        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct Check {
    /// Name of the food to check the expiry date of
    name: String,
}

impl Check {
    #[instrument]
    fn run(self, file: &Path) -> anyhow::Result<()> {
        let calendar = load_or_empty(file)?;

        match calendar.find_by_name(&self.name) {
            Some(food) => println!("Food expiry date: {}", date::display(food.expiry_date())),
            None => println!("{}", "Could not find named food".warning()),
        }

        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct Status {
    /// Name of the food to look for
    name: String,
}

impl Status {
    #[instrument]
    fn run(self, file: &Path) -> anyhow::Result<()> {
        let calendar = load_or_empty(file)?;
        let today = SystemClock.today();

        match calendar.find_by_name(&self.name) {
            Some(food) => println!("{}", food.describe(today)),
            None => println!("{}", "Could not find named food".warning()),
        }

        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct Expiring {
    /// Show foods that expire in this many days or fewer
    #[arg(allow_negative_numbers = true)]
    days: i64,
}

impl Expiring {
    #[instrument]
    fn run(self, file: &Path) -> anyhow::Result<()> {
        let calendar = load_or_empty(file)?;
        let today = SystemClock.today();

        let expiring = calendar.expiring_within(self.days, today);
        if expiring.is_empty() {
            println!("No food products expire within {} days", self.days);
        } else {
            for food in expiring {
                println!("{}", food.describe(today));
            }
        }

        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct Report {}

impl Report {
    #[instrument]
    fn run(self, file: &Path) -> anyhow::Result<()> {
        let calendar = load_or_empty(file)?;
        println!("{}", calendar.grouped_report(SystemClock.today()));
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct List {
    /// Regular expression filter applied to food names
    #[arg(long)]
    regex: Option<String>,
}

impl List {
    #[instrument]
    fn run(self, file: &Path) -> anyhow::Result<()> {
        let regex = self
            .regex
            .as_deref()
            .map(Regex::new)
            .transpose()
            .with_context(|| format!("invalid regex: {:?}", self.regex))?;

        let calendar = load_or_empty(file)?;
        let today = SystemClock.today();

        let mut shown = 0;
        for food in &calendar {
            if regex.as_ref().is_none_or(|re| re.is_match(food.name())) {
                println!("{}", food.describe(today));
                shown += 1;
            }
        }

        if shown == 0 {
            println!("{}", "No food products listed".dim());
        }

        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct Clear {
    /// Skip confirmation prompts
    #[arg(long, short)]
    yes: bool,
}

impl Clear {
    #[instrument]
    fn run(self, file: &Path) -> anyhow::Result<()> {
        if !self.yes {
            eprint!("Empty the list of food products? This cannot be undone. (y/N) ");
            let stdin = io::stdin();
            let mut line = String::new();
            stdin.lock().read_line(&mut line)?;
            if !line.trim().eq_ignore_ascii_case("y") {
                println!("No changes made");
                return Ok(());
            }
        }

        let mut calendar = load_or_empty(file)?;
        calendar.clear();
        storage::save(file, &calendar)?;

        println!("{}", "Emptied list".success());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    fn data_file(dir: &tempfile::TempDir) -> PathBuf {
        dir.path().join("calendar.json")
    }

    #[test]
    fn add_run_creates_and_persists_food() {
        let tmp = tempdir().unwrap();
        let file = data_file(&tmp);

        let add = Add {
            name: "milk".to_string(),
            expires: "2050/07/01".to_string(),
            purchased: "2050/06/25".to_string(),
        };
        add.run(&file).expect("add command should succeed");

        let calendar = storage::load(&file).unwrap();
        assert_eq!(calendar.len(), 1);
        assert_eq!(calendar.foods()[0].name(), "milk");
    }

    #[test]
    fn add_run_rejects_expiry_on_or_before_purchase() {
        let tmp = tempdir().unwrap();
        let file = data_file(&tmp);

        let add = Add {
            name: "milk".to_string(),
            expires: "2050/06/25".to_string(),
            purchased: "2050/06/25".to_string(),
        };

        assert!(add.run(&file).is_err());
        // Nothing was written.
        assert!(!file.exists());
    }

    #[test]
    fn add_run_rejects_malformed_date() {
        let tmp = tempdir().unwrap();
        let file = data_file(&tmp);

        let add = Add {
            name: "milk".to_string(),
            expires: "2050-07-01".to_string(),
            purchased: "2050/06/25".to_string(),
        };

        assert!(add.run(&file).is_err());
    }

    #[test]
    fn remove_run_deletes_first_match() {
        let tmp = tempdir().unwrap();
        let file = data_file(&tmp);

        let calendar: Calendar = [
            Food::new("milk", "2050/07/01", "2050/06/25").unwrap(),
            Food::new("bread", "2050/08/02", "2050/08/01").unwrap(),
        ]
        .into_iter()
        .collect();
        storage::save(&file, &calendar).unwrap();

        let remove = Remove {
            name: "milk".to_string(),
        };
        remove.run(&file).expect("remove command should succeed");

        let calendar = storage::load(&file).unwrap();
        assert_eq!(calendar.len(), 1);
        assert_eq!(calendar.foods()[0].name(), "bread");
    }

    #[test]
    fn remove_run_succeeds_when_name_is_absent() {
        let tmp = tempdir().unwrap();
        let file = data_file(&tmp);

        let remove = Remove {
            name: "ghost".to_string(),
        };
        remove
            .run(&file)
            .expect("remove of an absent food reports, not errors");
    }

    #[test]
    fn clear_run_with_yes_empties_calendar() {
        let tmp = tempdir().unwrap();
        let file = data_file(&tmp);

        let calendar: Calendar = [Food::new("milk", "2050/07/01", "2050/06/25").unwrap()]
            .into_iter()
            .collect();
        storage::save(&file, &calendar).unwrap();

        let clear = Clear { yes: true };
        clear.run(&file).expect("clear command should succeed");

        assert!(storage::load(&file).unwrap().is_empty());
    }

    #[test]
    fn report_run_succeeds_on_missing_file() {
        let tmp = tempdir().unwrap();
        let file = data_file(&tmp);

        Report {}
            .run(&file)
            .expect("report treats a missing file as an empty calendar");
    }

    #[test]
    fn expiring_run_succeeds_on_missing_file() {
        let tmp = tempdir().unwrap();
        let file = data_file(&tmp);

        Expiring { days: 7 }
            .run(&file)
            .expect("expiring treats a missing file as an empty calendar");
    }

    #[test]
    fn list_run_rejects_invalid_regex() {
        let tmp = tempdir().unwrap();
        let file = data_file(&tmp);

        let list = List {
            regex: Some("[".to_string()),
        };
        assert!(list.run(&file).is_err());
    }
}
