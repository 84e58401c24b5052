//! Command-line interface definitions using clap
//!
//! Every argument struct here converts into a core parameter struct with a
//! `From` impl, so clap attributes never leak into the core crate:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → CoffeeLab
//! ```

use std::path::PathBuf;

use brewlab_core::{
    models::{
        BrewStep, BrewStyle, MethodCategory, RoastLevel, SensoryProfile, StepKind, TargetMode,
        WaterTarget, parse_flavor_notes,
    },
    params::*,
};
use clap::{Parser, Subcommand, ValueEnum};
use jiff::civil::Date;
use uuid::Uuid;

/// Brew methods, water plans and tasting notes from the terminal
///
/// Brewlab keeps a local store of brew methods whose steps target a
/// cumulative amount of water, either in grams or as a multiple of the dose,
/// and turns them into concrete pours for the dose you are brewing today.
#[derive(Parser)]
#[command(version, about, name = "brew")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/brewlab/brewlab.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Sync endpoint to use for this run instead of the stored one
    #[arg(long, global = true)]
    pub sync_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Brewlab CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Manage brew methods
    #[command(alias = "m")]
    Method {
        #[command(subcommand)]
        command: MethodCommands,
    },
    /// Edit the steps of a method
    #[command(alias = "s")]
    Step {
        #[command(subcommand)]
        command: StepCommands,
    },
    /// Manage the coffee bean catalog
    #[command(alias = "b")]
    Bean {
        #[command(subcommand)]
        command: BeanCommands,
    },
    /// Manage grinder profiles
    #[command(alias = "g")]
    Grinder {
        #[command(subcommand)]
        command: GrinderCommands,
    },
    /// Log and review brews
    #[command(alias = "r")]
    Record {
        #[command(subcommand)]
        command: RecordCommands,
    },
    /// Quick water calculations
    #[command(alias = "c")]
    Calc {
        #[command(subcommand)]
        command: CalcCommands,
    },
    /// Run the guided brew timer for a method
    #[command(alias = "t")]
    Timer(TimerArgs),
    /// Configure and run sync with the spreadsheet endpoint
    Sync {
        #[command(subcommand)]
        command: SyncCommands,
    },
}

// ============================================================================
// Value enums
// ============================================================================

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum CategoryArg {
    Drip,
    Immersion,
    Espresso,
    Hybrid,
}

impl From<CategoryArg> for MethodCategory {
    fn from(val: CategoryArg) -> Self {
        match val {
            CategoryArg::Drip => MethodCategory::Drip,
            CategoryArg::Immersion => MethodCategory::Immersion,
            CategoryArg::Espresso => MethodCategory::Espresso,
            CategoryArg::Hybrid => MethodCategory::Hybrid,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum RoastArg {
    ExtraLight,
    Light,
    Medium,
    MediumDark,
    Dark,
}

impl From<RoastArg> for RoastLevel {
    fn from(val: RoastArg) -> Self {
        match val {
            RoastArg::ExtraLight => RoastLevel::ExtraLight,
            RoastArg::Light => RoastLevel::Light,
            RoastArg::Medium => RoastLevel::Medium,
            RoastArg::MediumDark => RoastLevel::MediumDark,
            RoastArg::Dark => RoastLevel::Dark,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum StepKindArg {
    Pour,
    Wait,
}

impl From<StepKindArg> for StepKind {
    fn from(val: StepKindArg) -> Self {
        match val {
            StepKindArg::Pour => StepKind::Pour,
            StepKindArg::Wait => StepKind::Wait,
        }
    }
}

/// How a step's water target is expressed
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum TargetModeArg {
    /// Multiple of the dose
    Ratio,
    /// Absolute grams
    Grams,
}

impl From<TargetModeArg> for TargetMode {
    fn from(val: TargetModeArg) -> Self {
        match val {
            TargetModeArg::Ratio => TargetMode::Ratio,
            TargetModeArg::Grams => TargetMode::Absolute,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum BrewStyleArg {
    Espresso,
    PourOver,
    FrenchPress,
}

impl From<BrewStyleArg> for BrewStyle {
    fn from(val: BrewStyleArg) -> Self {
        match val {
            BrewStyleArg::Espresso => BrewStyle::Espresso,
            BrewStyleArg::PourOver => BrewStyle::PourOver,
            BrewStyleArg::FrenchPress => BrewStyle::FrenchPress,
        }
    }
}

// ============================================================================
// Methods
// ============================================================================

/// Create a new brew method
#[derive(clap::Args)]
pub struct CreateMethodArgs {
    /// Name of the method
    pub name: String,
    #[arg(short, long, value_enum, default_value_t = CategoryArg::Drip)]
    pub category: CategoryArg,
    /// Recommended water temperature in °C
    #[arg(short, long, default_value_t = 92.0)]
    pub temp: f64,
    /// Recommended grams of water per gram of coffee
    #[arg(short, long, default_value_t = 15.0)]
    pub ratio: f64,
    #[arg(short, long)]
    pub description: Option<String>,
}

impl From<CreateMethodArgs> for CreateMethod {
    fn from(val: CreateMethodArgs) -> Self {
        CreateMethod {
            name: val.name,
            category: val.category.into(),
            recommended_temp: val.temp,
            recommended_ratio: val.ratio,
            description: val.description,
            steps: Vec::new(),
        }
    }
}

/// Show a method, optionally resolved against a dose
#[derive(clap::Args)]
pub struct ShowMethodArgs {
    /// ID of the method
    pub id: Uuid,
    /// Coffee dose in grams; shows the per-step water plan
    #[arg(long)]
    pub dose: Option<f64>,
}

/// Update a method's details
#[derive(clap::Args)]
pub struct UpdateMethodArgs {
    /// ID of the method
    pub id: Uuid,
    #[arg(short, long)]
    pub name: Option<String>,
    #[arg(short, long, value_enum)]
    pub category: Option<CategoryArg>,
    #[arg(short, long)]
    pub temp: Option<f64>,
    #[arg(short, long)]
    pub ratio: Option<f64>,
    #[arg(short, long)]
    pub description: Option<String>,
}

impl From<UpdateMethodArgs> for UpdateMethod {
    fn from(val: UpdateMethodArgs) -> Self {
        UpdateMethod {
            id: val.id,
            name: val.name,
            category: val.category.map(Into::into),
            recommended_temp: val.temp,
            recommended_ratio: val.ratio,
            description: val.description,
            steps: None,
        }
    }
}

/// Delete a resource permanently
#[derive(clap::Args)]
pub struct DeleteArgs {
    /// ID of the resource
    pub id: Uuid,
    /// Confirm the deletion
    #[arg(long, help = "Confirm permanent deletion (required)")]
    pub confirm: bool,
}

impl From<DeleteArgs> for Delete {
    fn from(val: DeleteArgs) -> Self {
        Delete {
            id: val.id,
            confirmed: val.confirm,
        }
    }
}

/// Write a method document to disk
#[derive(clap::Args)]
pub struct ExportMethodArgs {
    /// ID of the method
    pub id: Uuid,
    /// Directory to write the document into
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,
}

/// Import a method document
#[derive(clap::Args)]
pub struct ImportMethodArgs {
    /// Path of the JSON document
    pub file: PathBuf,
}

/// Build a share link for a method
#[derive(clap::Args)]
pub struct ShareMethodArgs {
    /// ID of the method
    pub id: Uuid,
    /// Address of the web app the link opens
    #[arg(long, default_value = "https://brewlab.app")]
    pub base: String,
}

/// Import the method carried by a share link
#[derive(clap::Args)]
pub struct ImportLinkArgs {
    /// Share link, or just its payload
    pub link: String,
}

/// Generic arguments for commands that only need an ID
#[derive(clap::Args)]
pub struct IdArgs {
    /// ID of the resource
    pub id: Uuid,
}

impl From<IdArgs> for Id {
    fn from(val: IdArgs) -> Self {
        Id { id: val.id }
    }
}

#[derive(Subcommand)]
pub enum MethodCommands {
    /// Create a new method
    #[command(alias = "c")]
    Create(CreateMethodArgs),
    /// List all methods
    #[command(aliases = ["l", "ls"])]
    List,
    /// Show a method and its steps
    #[command(alias = "s")]
    Show(ShowMethodArgs),
    /// Update a method's details
    #[command(alias = "u")]
    Update(UpdateMethodArgs),
    /// Delete a method permanently
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteArgs),
    /// Export a method as a JSON document
    Export(ExportMethodArgs),
    /// Import a method from a JSON document
    Import(ImportMethodArgs),
    /// Print a share link for a method
    Share(ShareMethodArgs),
    /// Import a method from a share link
    ImportLink(ImportLinkArgs),
}

// ============================================================================
// Steps
// ============================================================================

/// Definition of a single step
#[derive(clap::Args)]
pub struct StepSpecArgs {
    /// Display name of the step
    pub name: String,
    #[arg(short, long, value_enum, default_value_t = StepKindArg::Pour)]
    pub kind: StepKindArg,
    /// Cumulative water target as a multiple of the dose
    #[arg(short, long, conflicts_with = "grams")]
    pub ratio: Option<f64>,
    /// Cumulative water target in grams
    #[arg(short, long)]
    pub grams: Option<f64>,
    /// Duration in seconds
    #[arg(short, long, default_value_t = 30)]
    pub duration: u32,
    #[arg(long)]
    pub description: Option<String>,
}

impl From<StepSpecArgs> for BrewStep {
    fn from(val: StepSpecArgs) -> Self {
        let kind = StepKind::from(val.kind);
        let target = match kind {
            StepKind::Wait => WaterTarget::None,
            StepKind::Pour => WaterTarget::from_fields(val.grams, val.ratio),
        };
        BrewStep {
            name: val.name,
            kind,
            target,
            duration: val.duration,
            description: val.description,
        }
    }
}

/// Append a step to a method
#[derive(clap::Args)]
pub struct AddStepArgs {
    /// ID of the method
    pub method_id: Uuid,
    #[command(flatten)]
    pub step: StepSpecArgs,
}

impl From<AddStepArgs> for InsertStep {
    fn from(val: AddStepArgs) -> Self {
        InsertStep {
            method_id: val.method_id,
            position: None,
            step: val.step.into(),
        }
    }
}

/// Insert a step at a position (0-based)
#[derive(clap::Args)]
pub struct InsertStepArgs {
    /// ID of the method
    pub method_id: Uuid,
    /// Position for the new step; existing steps from here shift down
    pub position: usize,
    #[command(flatten)]
    pub step: StepSpecArgs,
}

impl From<InsertStepArgs> for InsertStep {
    fn from(val: InsertStepArgs) -> Self {
        InsertStep {
            method_id: val.method_id,
            position: Some(val.position),
            step: val.step.into(),
        }
    }
}

/// Identify a step by method and index
#[derive(clap::Args)]
pub struct StepIndexArgs {
    /// ID of the method
    pub method_id: Uuid,
    /// Index of the step (0-based)
    pub index: usize,
}

impl From<StepIndexArgs> for StepIndex {
    fn from(val: StepIndexArgs) -> Self {
        StepIndex {
            method_id: val.method_id,
            index: val.index,
        }
    }
}

/// Set how much ratio a single step adds
#[derive(clap::Args)]
pub struct IncrementalArgs {
    /// ID of the method
    pub method_id: Uuid,
    /// Index of the step (0-based)
    pub index: usize,
    /// Ratio poured during this step alone
    pub increment: f64,
}

impl From<IncrementalArgs> for SetIncrementalRatio {
    fn from(val: IncrementalArgs) -> Self {
        SetIncrementalRatio {
            method_id: val.method_id,
            index: val.index,
            increment: val.increment,
        }
    }
}

/// Switch a step between ratio and gram targets
#[derive(clap::Args)]
pub struct StepModeArgs {
    /// ID of the method
    pub method_id: Uuid,
    /// Index of the step (0-based)
    pub index: usize,
    #[arg(value_enum)]
    pub mode: TargetModeArg,
    /// Dose used to convert the current value
    #[arg(long, default_value_t = 15.0)]
    pub dose: f64,
}

impl From<StepModeArgs> for SwitchStepMode {
    fn from(val: StepModeArgs) -> Self {
        SwitchStepMode {
            method_id: val.method_id,
            index: val.index,
            mode: val.mode.into(),
            dose: val.dose,
        }
    }
}

#[derive(Subcommand)]
pub enum StepCommands {
    /// Append a step to a method
    #[command(alias = "a")]
    Add(AddStepArgs),
    /// Insert a step at a specific position
    #[command(alias = "i")]
    Insert(InsertStepArgs),
    /// Remove a step
    #[command(aliases = ["r", "rm"])]
    Remove(StepIndexArgs),
    /// Set the ratio a step adds on top of the previous one
    Incremental(IncrementalArgs),
    /// Switch a step between ratio and grams
    Mode(StepModeArgs),
}

// ============================================================================
// Beans
// ============================================================================

/// Add a bag of coffee to the catalog
#[derive(clap::Args)]
pub struct AddBeanArgs {
    pub name: String,
    #[arg(short, long, value_enum, default_value_t = RoastArg::Medium)]
    pub roast: RoastArg,
    #[arg(short, long)]
    pub shop: Option<String>,
    /// Purchase date (YYYY-MM-DD); defaults to today
    #[arg(short, long)]
    pub purchased: Option<Date>,
    /// Weight in grams
    #[arg(short, long, default_value_t = 250.0)]
    pub weight: f64,
    /// Comma-separated tasting notes
    #[arg(short, long)]
    pub notes: Option<String>,
}

impl AddBeanArgs {
    /// Convert to core params, with `today` standing in for a missing date.
    pub fn into_params(self, today: Date) -> CreateBean {
        CreateBean {
            name: self.name,
            roast_level: self.roast.into(),
            shop: self.shop,
            purchase_date: self.purchased.unwrap_or(today),
            weight: self.weight,
            flavor_notes: self.notes.as_deref().map(parse_flavor_notes).unwrap_or_default(),
        }
    }
}

/// List beans
#[derive(clap::Args)]
pub struct ListBeansArgs {
    /// Only beans still in use
    #[arg(long)]
    pub active: bool,
}

impl From<ListBeansArgs> for ListBeans {
    fn from(val: ListBeansArgs) -> Self {
        ListBeans {
            active_only: val.active,
        }
    }
}

/// Update a bean
#[derive(clap::Args)]
pub struct UpdateBeanArgs {
    pub id: Uuid,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(short, long, value_enum)]
    pub roast: Option<RoastArg>,
    #[arg(short, long)]
    pub shop: Option<String>,
    #[arg(short, long)]
    pub purchased: Option<Date>,
    #[arg(short, long)]
    pub weight: Option<f64>,
    /// Comma-separated tasting notes, replacing the current ones
    #[arg(short, long)]
    pub notes: Option<String>,
    /// Mark the bag as finished
    #[arg(long, conflicts_with = "reopen")]
    pub finished: bool,
    /// Mark the bag as in use again
    #[arg(long)]
    pub reopen: bool,
}

impl From<UpdateBeanArgs> for UpdateBean {
    fn from(val: UpdateBeanArgs) -> Self {
        let is_active = match (val.finished, val.reopen) {
            (true, _) => Some(false),
            (_, true) => Some(true),
            _ => None,
        };
        UpdateBean {
            id: val.id,
            name: val.name,
            roast_level: val.roast.map(Into::into),
            shop: val.shop,
            purchase_date: val.purchased,
            weight: val.weight,
            flavor_notes: val.notes.as_deref().map(parse_flavor_notes),
            is_active,
        }
    }
}

#[derive(Subcommand)]
pub enum BeanCommands {
    /// Add a bean
    #[command(alias = "a")]
    Add(AddBeanArgs),
    /// List beans
    #[command(aliases = ["l", "ls"])]
    List(ListBeansArgs),
    /// Show a bean
    #[command(alias = "s")]
    Show(IdArgs),
    /// Update a bean
    #[command(alias = "u")]
    Update(UpdateBeanArgs),
    /// Delete a bean permanently
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteArgs),
}

// ============================================================================
// Grinders
// ============================================================================

/// Add a grinder profile
#[derive(clap::Args)]
pub struct AddGrinderArgs {
    pub name: String,
    #[arg(long, default_value_t = 0.0)]
    pub min: f64,
    #[arg(long, default_value_t = 10.0)]
    pub max: f64,
    /// Increment between settings
    #[arg(long, default_value_t = 0.1)]
    pub step: f64,
    /// Setting used when nothing else is chosen
    #[arg(long, default_value_t = 5.0)]
    pub default: f64,
}

impl From<AddGrinderArgs> for CreateGrinder {
    fn from(val: AddGrinderArgs) -> Self {
        CreateGrinder {
            name: val.name,
            default_setting: val.default,
            min_setting: val.min,
            max_setting: val.max,
            step: val.step,
            ranges: None,
        }
    }
}

/// Update a grinder profile
#[derive(clap::Args)]
pub struct UpdateGrinderArgs {
    pub id: Uuid,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub min: Option<f64>,
    #[arg(long)]
    pub max: Option<f64>,
    #[arg(long)]
    pub step: Option<f64>,
    #[arg(long)]
    pub default: Option<f64>,
}

impl From<UpdateGrinderArgs> for UpdateGrinder {
    fn from(val: UpdateGrinderArgs) -> Self {
        UpdateGrinder {
            id: val.id,
            name: val.name,
            default_setting: val.default,
            min_setting: val.min,
            max_setting: val.max,
            step: val.step,
            ranges: None,
        }
    }
}

/// Show the recommended setting range for a brew style
#[derive(clap::Args)]
pub struct GrinderRangesArgs {
    #[arg(value_enum)]
    pub style: BrewStyleArg,
    /// Grinder to look up; defaults to the preferred grinder
    #[arg(long)]
    pub id: Option<Uuid>,
}

#[derive(Subcommand)]
pub enum GrinderCommands {
    /// Add a grinder profile
    #[command(alias = "a")]
    Add(AddGrinderArgs),
    /// List grinder profiles
    #[command(aliases = ["l", "ls"])]
    List,
    /// Show a grinder profile
    #[command(alias = "s")]
    Show(IdArgs),
    /// Update a grinder profile
    #[command(alias = "u")]
    Update(UpdateGrinderArgs),
    /// Delete a grinder profile permanently
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteArgs),
    /// Recommended setting range for a brew style
    Ranges(GrinderRangesArgs),
}

// ============================================================================
// Brew records
// ============================================================================

/// Log a brew and how it tasted
#[derive(clap::Args)]
pub struct LogBrewArgs {
    /// Bean used
    #[arg(long)]
    pub bean: Option<Uuid>,
    /// Method used
    #[arg(long)]
    pub method: Option<Uuid>,
    /// Grinder used
    #[arg(long)]
    pub grinder: Option<Uuid>,
    /// Grinder setting
    #[arg(long, default_value_t = 0.0)]
    pub setting: f64,
    /// Dose in grams
    #[arg(long, default_value_t = 15.0)]
    pub dose: f64,
    /// Water in grams
    #[arg(long, default_value_t = 225.0)]
    pub water: f64,
    /// Water temperature in °C
    #[arg(long, default_value_t = 92.0)]
    pub temp: f64,
    /// Total brew time as mm:ss
    #[arg(long, default_value = "02:30")]
    pub time: String,
    #[arg(long, default_value_t = 3)]
    pub aroma: u8,
    #[arg(long, default_value_t = 3)]
    pub acidity: u8,
    #[arg(long, default_value_t = 3)]
    pub sweetness: u8,
    #[arg(long, default_value_t = 3)]
    pub body: u8,
    #[arg(long, default_value_t = 3)]
    pub aftertaste: u8,
    #[arg(long, default_value_t = 3)]
    pub balance: u8,
    #[arg(long, default_value_t = 3)]
    pub overall: u8,
    #[arg(short, long)]
    pub notes: Option<String>,
}

impl From<LogBrewArgs> for LogBrew {
    fn from(val: LogBrewArgs) -> Self {
        LogBrew {
            bean_id: val.bean,
            method_id: val.method,
            grinder_id: val.grinder,
            setting_used: val.setting,
            bean_weight: val.dose,
            water_weight: val.water,
            temperature: val.temp,
            total_time: val.time,
            sensory: SensoryProfile {
                aroma: val.aroma,
                acidity: val.acidity,
                sweetness: val.sweetness,
                body: val.body,
                aftertaste: val.aftertaste,
                balance: val.balance,
                overall: val.overall,
            },
            notes: val.notes,
        }
    }
}

/// List logged brews
#[derive(clap::Args)]
pub struct ListRecordsArgs {
    /// Show at most this many brews
    #[arg(short, long)]
    pub limit: Option<usize>,
}

#[derive(Subcommand)]
pub enum RecordCommands {
    /// Log a brew
    #[command(alias = "l")]
    Log(LogBrewArgs),
    /// List logged brews, newest first
    #[command(alias = "ls")]
    List(ListRecordsArgs),
    /// Show a logged brew
    #[command(alias = "s")]
    Show(IdArgs),
}

// ============================================================================
// Calculations
// ============================================================================

/// Turn per-step amounts into cumulative targets
#[derive(clap::Args)]
pub struct CumulativeArgs {
    /// Amount poured in each step, in order
    #[arg(required = true, num_args = 1..)]
    pub values: Vec<f64>,
}

/// Suggest water and temperature for a dose
#[derive(clap::Args)]
pub struct SuggestArgs {
    /// Dose in grams
    #[arg(long)]
    pub dose: f64,
    /// Use this method's recommended ratio and temperature
    #[arg(long, conflicts_with = "roast")]
    pub method: Option<Uuid>,
    /// Use the rule of thumb for a roast level
    #[arg(long, value_enum)]
    pub roast: Option<RoastArg>,
}

#[derive(Subcommand)]
pub enum CalcCommands {
    /// Running totals of per-step amounts
    Cumulative(CumulativeArgs),
    /// Water and temperature for a dose
    Suggest(SuggestArgs),
}

// ============================================================================
// Timer
// ============================================================================

/// Run the brew timer
#[derive(clap::Args)]
pub struct TimerArgs {
    /// ID of the method to brew
    pub method: Uuid,
    /// Dose in grams
    #[arg(long)]
    pub dose: f64,
    /// Length of one timer second, in milliseconds
    #[arg(long, default_value_t = 1000, hide = true)]
    pub tick_ms: u64,
}

impl From<&TimerArgs> for WaterPlanRequest {
    fn from(val: &TimerArgs) -> Self {
        WaterPlanRequest {
            method_id: val.method,
            dose: val.dose,
        }
    }
}

// ============================================================================
// Sync
// ============================================================================

#[derive(clap::Args)]
pub struct SetUrlArgs {
    /// Webhook URL of the spreadsheet endpoint
    pub url: String,
}

#[derive(Subcommand)]
pub enum SyncCommands {
    /// Store the sync endpoint URL
    SetUrl(SetUrlArgs),
    /// Forget the stored sync endpoint URL
    Clear,
    /// Show the sync endpoint in use
    Status,
    /// Push every local entity to the endpoint
    Push,
    /// Merge entities from the endpoint into the local store
    Pull,
}
