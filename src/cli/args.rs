use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "fleetdesk",
    version,
    about = "terminal admin console for a boat-rental fleet backend",
    long_about = "Fleetdesk is a terminal client for the fleet-management REST backend: list, filter and page through boats, maintenances, payments and owners, and apply changes back.\n\nExamples:\n  fleetdesk login -u admin -p secret\n  fleetdesk boats list --search manta --filter type=TURISMO\n  fleetdesk boats list --server-side --page 2\n  fleetdesk payments list --browse\n\nTip: run 'fleetdesk config init' to persist the backend URL and defaults."
)]
pub struct CliArgs {
    #[arg(
        short = 'C',
        long = "cfg",
        visible_alias = "config",
        value_name = "FILE",
        help_heading = "General",
        help = "Path to config file (defaults to ~/.fleetdesk/config.yml)."
    )]
    pub config: Option<String>,

    #[arg(
        short = 'b',
        long = "url",
        visible_alias = "base-url",
        value_name = "URL",
        help_heading = "General",
        help = "Backend base URL (e.g. http://localhost:8080)."
    )]
    pub base_url: Option<String>,

    #[arg(
        short = 'T',
        long = "to",
        visible_alias = "timeout",
        value_name = "SECONDS",
        help_heading = "General",
        help = "Per-request timeout in seconds."
    )]
    pub timeout: Option<u64>,

    #[arg(
        short = 'n',
        long = "nc",
        visible_alias = "no-color",
        help_heading = "Output",
        help = "Disable colored output."
    )]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authenticate against the backend and store the session.
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
        #[arg(long = "ut", visible_alias = "user-type", default_value = "admin")]
        user_type: String,
    },
    /// Clear the stored session.
    Logout,
    /// Config file management.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Fleet inventory.
    Boats {
        #[command(subcommand)]
        action: BoatAction,
    },
    /// Maintenance schedule.
    Maintenances {
        #[command(subcommand)]
        action: MaintenanceAction,
    },
    /// Owner payments.
    Payments {
        #[command(subcommand)]
        action: PaymentAction,
    },
    /// Owner accounts.
    Owners {
        #[command(subcommand)]
        action: OwnerAction,
    },
    /// Per-boat documents.
    Documents {
        #[command(subcommand)]
        action: DocumentAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Write a commented default config file if none exists.
    Init,
}

/// Listing options shared by every entity kind.
#[derive(Args, Debug, Clone, Default)]
pub struct ListOpts {
    #[arg(
        short = 's',
        long,
        value_name = "TEXT",
        help_heading = "Listing",
        help = "Free-text search (case-insensitive)."
    )]
    pub search: Option<String>,

    #[arg(
        short = 'f',
        long,
        value_name = "FIELD=VALUE",
        action = ArgAction::Append,
        help_heading = "Listing",
        help = "Equality filter, repeatable (e.g. -f status=PROGRAMADO); VALUE 'all' clears."
    )]
    pub filter: Vec<String>,

    #[arg(
        short = 'p',
        long,
        value_name = "N",
        help_heading = "Listing",
        help = "Zero-based page index."
    )]
    pub page: Option<usize>,

    #[arg(
        short = 'z',
        long,
        value_name = "N",
        help_heading = "Listing",
        help = "Page size."
    )]
    pub size: Option<usize>,

    #[arg(
        long = "ss",
        visible_alias = "server-side",
        help_heading = "Listing",
        help = "Let the backend paginate and filter (boats and owners only)."
    )]
    pub server_side: bool,

    #[arg(
        long,
        help_heading = "Listing",
        help = "Interactive browse loop (n/p/g/search/filter/reload/quit)."
    )]
    pub browse: bool,

    #[arg(
        long,
        value_name = "USER_ID",
        help_heading = "Listing",
        help = "Restrict to one owner's records (owner dashboard view)."
    )]
    pub owner: Option<i64>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum BoatAction {
    List(ListOpts),
    Show {
        id: i64,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        model: String,
        #[arg(long = "kind", visible_alias = "type", value_name = "TYPE")]
        boat_type: String,
        #[arg(long)]
        location: String,
        #[arg(long)]
        price: f64,
    },
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        model: Option<String>,
        #[arg(long = "kind", visible_alias = "type", value_name = "TYPE")]
        boat_type: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        price: Option<f64>,
    },
    Delete {
        id: i64,
    },
    /// Assign an owner to a boat.
    AssignOwner {
        boat_id: i64,
        owner_id: i64,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum MaintenanceAction {
    List(ListOpts),
    Create {
        #[arg(long = "boat", value_name = "BOAT_ID")]
        boat_id: i64,
        #[arg(long = "kind", visible_alias = "type", value_name = "TYPE")]
        maintenance_type: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        cost: f64,
        #[arg(long = "scheduled", value_name = "TIMESTAMP")]
        scheduled_date: String,
        #[arg(long, default_value = "MEDIA")]
        priority: String,
    },
    Update {
        id: i64,
        #[arg(long = "kind", visible_alias = "type", value_name = "TYPE")]
        maintenance_type: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        cost: Option<f64>,
        #[arg(long = "scheduled", value_name = "TIMESTAMP")]
        scheduled_date: Option<String>,
        #[arg(long = "performed", value_name = "TIMESTAMP")]
        performed_date: Option<String>,
        #[arg(long)]
        priority: Option<String>,
    },
    Delete {
        id: i64,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum PaymentAction {
    List(ListOpts),
    Create {
        #[arg(long = "boat", value_name = "BOAT_ID")]
        boat_id: i64,
        #[arg(long = "user", value_name = "USER_ID")]
        user_id: i64,
        #[arg(long)]
        amount: f64,
        #[arg(long)]
        reason: String,
        #[arg(long, value_name = "TIMESTAMP", help = "Defaults to now.")]
        date: Option<String>,
        #[arg(long, value_name = "REFERENCE")]
        invoice: Option<String>,
    },
    Delete {
        id: i64,
    },
    /// Attach a receipt file (jpg/png/pdf, max 5 MB).
    AttachReceipt {
        id: i64,
        #[arg(long, value_name = "FILE")]
        file: String,
    },
    /// Download a payment's receipt.
    DownloadReceipt {
        id: i64,
        #[arg(short, long, value_name = "FILE", help = "Defaults to receipt-<id>.pdf.")]
        out: Option<String>,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum OwnerAction {
    List(ListOpts),
    Show {
        id: i64,
    },
    Create {
        #[arg(long = "name", value_name = "FULL_NAME")]
        full_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    Update {
        id: i64,
        #[arg(long = "name", value_name = "FULL_NAME")]
        full_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    Delete {
        id: i64,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum DocumentAction {
    List {
        #[arg(long = "boat", value_name = "BOAT_ID")]
        boat_id: i64,
        #[command(flatten)]
        opts: ListOpts,
    },
    Upload {
        #[arg(long = "boat", value_name = "BOAT_ID")]
        boat_id: i64,
        #[arg(long, value_name = "FILE")]
        file: String,
        #[arg(long, value_name = "NAME", help = "Defaults to the file name.")]
        name: Option<String>,
    },
    Rename {
        #[arg(long = "boat", value_name = "BOAT_ID")]
        boat_id: i64,
        id: i64,
        #[arg(long, value_name = "NAME")]
        name: String,
    },
    Delete {
        #[arg(long = "boat", value_name = "BOAT_ID")]
        boat_id: i64,
        id: i64,
    },
}
