//! Command-line definitions

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use rewards_admin_core::{
    ChallengeStatus, ChallengeType, ClaimMode, ClaimType, MissAction, RewardKind, TaskType,
    XpImpact,
};
use rewards_admin_engine::calendar::CalendarView;
use rewards_admin_engine::listing::DEFAULT_PAGE_SIZE;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rewards-admin", version, about = "Admin console for the rewards platform")]
pub struct Cli {
    /// API base URL (overrides the saved session's URL)
    #[arg(long, global = true, env = "REWARDS_ADMIN_API_URL")]
    pub api_url: Option<String>,

    /// Bearer token to use instead of a saved session
    #[arg(long, global = true, env = "REWARDS_ADMIN_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Saved session to use instead of the active one
    #[arg(long, global = true)]
    pub session: Option<String>,

    /// Directory holding the session database
    #[arg(long, global = true, env = "REWARDS_ADMIN_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value_t = 30)]
    pub timeout: u64,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage saved admin sessions
    Session {
        #[command(subcommand)]
        command: SessionCommands,
    },
    /// Daily challenges and the challenge calendar
    Challenges {
        #[command(subcommand)]
        command: ChallengeCommands,
    },
    /// XP multipliers keyed by streak length
    Multipliers {
        #[command(subcommand)]
        command: MultiplierCommands,
    },
    /// Bonus rewards for streak days
    BonusDays {
        #[command(subcommand)]
        command: BonusDayCommands,
    },
    /// Streak bonus milestones
    Streak {
        #[command(subcommand)]
        command: StreakCommands,
    },
    /// What happens when a streak day is missed
    PauseRules {
        #[command(subcommand)]
        command: PauseRuleCommands,
    },
    Games {
        #[command(subcommand)]
        command: GameCommands,
    },
    Offers {
        #[command(subcommand)]
        command: OfferCommands,
    },
    Tasks {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Third-party SDK credentials
    Integrations {
        #[command(subcommand)]
        command: IntegrationCommands,
    },
    /// Show lookup tables (countries, tiers, segments, SDK providers)
    MasterData {
        #[arg(value_enum, default_value = "all")]
        table: MasterTable,
    },
}

#[derive(Subcommand)]
pub enum SessionCommands {
    /// Save a session from --api-url and --token (prompts for the token if missing)
    Add { name: String },
    List,
    /// Make a saved session the active one
    Use { name: String },
    Remove {
        name: String,
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Case-insensitive text search
    #[arg(long, short = 'q')]
    pub search: Option<String>,
    #[arg(long, default_value_t = 1)]
    pub page: usize,
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,
}

#[derive(Args, Debug, Clone)]
pub struct DeleteArgs {
    pub id: String,
    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ToggleArgs {
    pub id: String,
    /// on/off, true/false or yes/no
    #[arg(action = ArgAction::Set, required = true, value_parser = BoolishValueParser::new())]
    pub on: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ChallengeFilterArgs {
    /// Only these types (comma-separated)
    #[arg(long = "type", value_delimiter = ',')]
    pub types: Vec<ChallengeType>,
    /// Only these statuses, as derived from the date (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub status: Vec<ChallengeStatus>,
    #[arg(long)]
    pub visible_only: bool,
}

#[derive(Subcommand)]
pub enum ChallengeCommands {
    List {
        #[command(flatten)]
        list: ListArgs,
        #[command(flatten)]
        filter: ChallengeFilterArgs,
    },
    /// Month, week or day calendar of scheduled challenges
    Calendar {
        #[arg(long, default_value = "month")]
        view: CalendarView,
        /// Any day inside the period to show (defaults to today)
        #[arg(long)]
        date: Option<String>,
        /// Periods to move from the reference date (negative goes back)
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        offset: i32,
        #[command(flatten)]
        filter: ChallengeFilterArgs,
    },
    Create(ChallengeFields),
    Update {
        id: String,
        #[command(flatten)]
        fields: ChallengeFields,
    },
    Delete(DeleteArgs),
    /// Show or hide a challenge in the app
    Visibility(ToggleArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct ChallengeFields {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long = "type")]
    pub kind: Option<ChallengeType>,
    #[arg(long)]
    pub date: Option<String>,
    #[arg(long)]
    pub coins: Option<u32>,
    #[arg(long)]
    pub xp: Option<u32>,
    #[arg(long)]
    pub claim: Option<ClaimType>,
    #[arg(long)]
    pub visible: Option<bool>,
    #[arg(long)]
    pub status: Option<ChallengeStatus>,
}

#[derive(Subcommand)]
pub enum MultiplierCommands {
    List(ListArgs),
    Create(MultiplierFields),
    Update {
        id: String,
        #[command(flatten)]
        fields: MultiplierFields,
    },
    Delete(DeleteArgs),
    /// Turn a multiplier on or off
    Toggle(ToggleArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct MultiplierFields {
    #[arg(long)]
    pub streak_length: Option<u32>,
    #[arg(long)]
    pub multiplier: Option<f64>,
    #[arg(long)]
    pub vip: Option<bool>,
    #[arg(long)]
    pub active: Option<bool>,
    #[arg(long)]
    pub notes: Option<String>,
}

/// Reward flags shared by bonus days and milestones
#[derive(Args, Debug, Clone, Default)]
pub struct RewardFlags {
    #[arg(long)]
    pub coins: Option<u32>,
    #[arg(long)]
    pub xp: Option<u32>,
    /// Drop a reward entry (coins or xp)
    #[arg(long = "remove-reward")]
    pub remove: Vec<RewardKind>,
}

#[derive(Subcommand)]
pub enum BonusDayCommands {
    List(ListArgs),
    Create(BonusDayFields),
    Update {
        id: String,
        #[command(flatten)]
        fields: BonusDayFields,
    },
    Delete(DeleteArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct BonusDayFields {
    #[arg(long)]
    pub day: Option<u32>,
    #[command(flatten)]
    pub rewards: RewardFlags,
    #[arg(long)]
    pub reset_rule: Option<bool>,
}

#[derive(Subcommand)]
pub enum StreakCommands {
    Show,
    Enable,
    Disable,
    /// Add a milestone
    Add(MilestoneFields),
    /// Edit the milestone at DAY (use --day to move it)
    Update {
        milestone: u32,
        #[command(flatten)]
        fields: MilestoneFields,
    },
    Remove {
        day: u32,
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct MilestoneFields {
    #[arg(long)]
    pub day: Option<u32>,
    #[command(flatten)]
    pub rewards: RewardFlags,
    #[arg(long)]
    pub claim_mode: Option<ClaimMode>,
    #[arg(long)]
    pub active: Option<bool>,
}

#[derive(Subcommand)]
pub enum PauseRuleCommands {
    List(ListArgs),
    Create(PauseRuleFields),
    Update {
        id: String,
        #[command(flatten)]
        fields: PauseRuleFields,
    },
    Delete(DeleteArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct PauseRuleFields {
    #[arg(long)]
    pub name: Option<String>,
    /// pause_streak, reset_streak or use_grace_day
    #[arg(long)]
    pub action: Option<MissAction>,
    #[arg(long)]
    pub grace_days: Option<u32>,
    /// none, freeze or reset
    #[arg(long)]
    pub impact: Option<XpImpact>,
    #[arg(long)]
    pub reset_coins: Option<bool>,
}

#[derive(Subcommand)]
pub enum GameCommands {
    List {
        #[command(flatten)]
        list: ListArgs,
        /// Only games from this SDK provider
        #[arg(long)]
        provider: Option<String>,
    },
    Create(GameFields),
    Update {
        id: String,
        #[command(flatten)]
        fields: GameFields,
    },
    Delete(DeleteArgs),
    Activate(ToggleArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct GameFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub provider: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long, value_delimiter = ',')]
    pub countries: Vec<String>,
    #[arg(long, value_delimiter = ',')]
    pub tiers: Vec<String>,
    #[arg(long, value_delimiter = ',')]
    pub segments: Vec<String>,
    /// Creative image URLs (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub creatives: Vec<String>,
    #[arg(long)]
    pub coins: Option<u32>,
    #[arg(long)]
    pub xp: Option<u32>,
    #[arg(long)]
    pub active: Option<bool>,
    #[arg(long)]
    pub sort_order: Option<u32>,
}

#[derive(Subcommand)]
pub enum OfferCommands {
    List {
        #[command(flatten)]
        list: ListArgs,
        /// Only offers attached to this game id
        #[arg(long)]
        game: Option<String>,
    },
    Create(OfferFields),
    Update {
        id: String,
        #[command(flatten)]
        fields: OfferFields,
    },
    Delete(DeleteArgs),
    Activate(ToggleArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct OfferFields {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Game id to attach the offer to (empty to detach)
    #[arg(long)]
    pub game: Option<String>,
    #[arg(long)]
    pub provider: Option<String>,
    #[arg(long)]
    pub payout: Option<u32>,
    #[arg(long, value_delimiter = ',')]
    pub countries: Vec<String>,
    #[arg(long, value_delimiter = ',')]
    pub tiers: Vec<String>,
    /// First day the offer runs (empty for open-ended)
    #[arg(long)]
    pub start: Option<String>,
    /// Last day the offer runs (empty for open-ended)
    #[arg(long)]
    pub end: Option<String>,
    #[arg(long)]
    pub active: Option<bool>,
}

#[derive(Subcommand)]
pub enum TaskCommands {
    List(ListArgs),
    Create(TaskFields),
    Update {
        id: String,
        #[command(flatten)]
        fields: TaskFields,
    },
    Delete(DeleteArgs),
    Activate(ToggleArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct TaskFields {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// daily, weekly or one_time
    #[arg(long = "type")]
    pub kind: Option<TaskType>,
    #[arg(long)]
    pub target: Option<u32>,
    #[arg(long)]
    pub coins: Option<u32>,
    #[arg(long)]
    pub xp: Option<u32>,
    #[arg(long)]
    pub active: Option<bool>,
}

#[derive(Subcommand)]
pub enum IntegrationCommands {
    List(ListArgs),
    Create(IntegrationFields),
    Update {
        id: String,
        #[command(flatten)]
        fields: IntegrationFields,
    },
    Delete(DeleteArgs),
    Enable(ToggleArgs),
}

#[derive(Args, Clone, Default)]
pub struct IntegrationFields {
    #[arg(long)]
    pub provider: Option<String>,
    #[arg(long)]
    pub display_name: Option<String>,
    #[arg(long)]
    pub app_id: Option<String>,
    #[arg(long)]
    pub api_key: Option<String>,
    #[arg(long)]
    pub secret: Option<String>,
    #[arg(long)]
    pub enabled: Option<bool>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MasterTable {
    All,
    Countries,
    Tiers,
    Segments,
    Providers,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_challenge_list_filters() {
        let cli = Cli::try_parse_from([
            "rewards-admin",
            "challenges",
            "list",
            "--type",
            "spin,watch_ad",
            "--status",
            "live",
            "--page",
            "2",
        ])
        .unwrap();
        match cli.command {
            Commands::Challenges {
                command: ChallengeCommands::List { list, filter },
            } => {
                assert_eq!(list.page, 2);
                assert_eq!(filter.types, vec![ChallengeType::Spin, ChallengeType::WatchAd]);
                assert_eq!(filter.status, vec![ChallengeStatus::Live]);
            }
            _ => panic!("wrong command"),
        }
    }

    #[test]
    fn test_toggle_accepts_on_off() {
        let cli = Cli::try_parse_from(["rewards-admin", "games", "activate", "g1", "off"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Games {
                command: GameCommands::Activate(ToggleArgs { on: false, .. })
            }
        ));
        assert!(Cli::try_parse_from(["rewards-admin", "tasks", "activate", "t1"]).is_err());
    }

    #[test]
    fn test_calendar_accepts_negative_offset() {
        let cli = Cli::try_parse_from([
            "rewards-admin",
            "challenges",
            "calendar",
            "--view",
            "week",
            "--offset",
            "-2",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Challenges {
                command: ChallengeCommands::Calendar {
                    view: CalendarView::Week,
                    offset: -2,
                    ..
                }
            }
        ));
    }

    #[test]
    fn test_bonus_day_reward_flags() {
        let cli = Cli::try_parse_from([
            "rewards-admin",
            "bonus-days",
            "create",
            "--day",
            "5",
            "--xp",
            "20",
            "--remove-reward",
            "coins",
        ])
        .unwrap();
        match cli.command {
            Commands::BonusDays {
                command: BonusDayCommands::Create(fields),
            } => {
                assert_eq!(fields.day, Some(5));
                assert_eq!(fields.rewards.xp, Some(20));
                assert_eq!(fields.rewards.remove, vec![RewardKind::Coins]);
            }
            _ => panic!("wrong command"),
        }
    }
}
