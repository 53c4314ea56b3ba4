mod config;
#[cfg(feature = "interactive")]
mod menu;

pub use config::AppConfig;

use crate::cli::{self, Repl};
use crate::context::{Context, CURRENT_DRAFT_ID_KEY, FORMAT_KEY, OUR_SIDE_KEY};
use crate::draft::DraftSession;
use crate::opt::*;
use crate::provider::*;

fn log(s: String) {
    log_if(s.as_str(), DbgFlg::Cli);
}

pub async fn main(context: &Context) -> Res<()> {
    let config = AppConfig::load(context)?;
    config.dbg_if(DbgFlg::Cli);

    let formats = FormatLoader::new(&config.resource_dir, config.slot_capacity);
    let champions = ChampionLoader::load(&config.resource_dir).await?;
    let profiles = ProfileStore::open(context.data_dir()).await?;

    #[cfg(feature = "interactive")]
    let config = {
        let mut config = config;
        let available = formats.list_formats().await.unwrap_or_else(|err| {
            log(format!("Unable to list formats: {}", err));
            Vec::new()
        });
        match menu::choose(&available, &config) {
            Some((format_key, our_side)) => {
                config.format_key = format_key;
                config.our_side = our_side;
            }
            None => {
                log("Exiting...".to_string());
                return Ok(());
            }
        }
        config
    };

    let mut session = DraftSession::new(config.our_side, config.slot_capacity);
    match formats.get_format(&config.format_key).await {
        Ok(format) => {
            session.set_format(&config.format_key, format)?;
            context.write_data(FORMAT_KEY, &config.format_key)?;
        }
        Err(err) => log(format!("Starting without a format: {}", err)),
    }
    context.write_data(OUR_SIDE_KEY, &config.our_side.to_string())?;
    context.write_data(CURRENT_DRAFT_ID_KEY, session.id())?;

    let mut repl = Repl {
        session,
        formats,
        matcher: champions.matcher(),
        champions,
        profiles,
        context,
    };
    cli::main(&mut repl).await.err_to_str()
}
