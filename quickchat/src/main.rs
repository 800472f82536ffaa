use clap::Parser as _;

mod app;

/// QuickChat message simulator: register, log in, send short messages and
/// run reports over the session ledger
#[derive(clap::Parser, Debug)]
struct CliArguments {
    /// Line-oriented JSON file messages are appended to and reloaded from
    #[arg(short, long, value_name = "PATH", default_value = "messages.json")]
    store_file: std::path::PathBuf,

    /// Maximum number of messages kept per category
    #[arg(short, long, default_value_t = quickchat_lib::DEFAULT_CAPACITY)]
    capacity: usize,

    /// Skip registration and login and go straight to the main menu
    #[arg(long)]
    skip_login: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = CliArguments::parse();
    log::info!("{:?}", args);

    let store = quickchat_lib::MessageStore::new(args.store_file);
    let mut app = app::App::new(args.capacity, store);
    app.hydrate_from_store();

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut input = stdin.lock();
    let mut output = stdout.lock();
    if args.skip_login {
        app.main_menu(&mut input, &mut output)
    } else {
        app.run(&mut input, &mut output)
    }
}
