use clap::Parser;
use folio::config;
use folio::gui::app::AppModel;
use folio::sys::runtime;
use relm4::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "folio", version, about, long_about = None)]
struct Cli {
    /// Write the default config file (if missing), print its path and exit
    #[arg(long)]
    init_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.init_config {
        let path = config::write_default_config()?;
        println!("{}", path.display());
        return Ok(());
    }

    let config = config::load_or_default();

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    let handle = runtime::start_background_services(tx)?;

    let app = RelmApp::new("dev.folio.Folio").with_args(Vec::new());
    app.run::<AppModel>((config, handle, rx));

    Ok(())
}
