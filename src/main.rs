use dotenv::dotenv;

mod app;
mod cli;
mod context;
mod draft;
mod models;
mod opt;
mod provider;

#[tokio::main]
async fn main() {
    dotenv().ok();

    let context = match context::create_context() {
        Ok(context) => context,
        Err(err) => {
            eprintln!("Unable to create the runtime context: {}", err);
            std::process::exit(1);
        }
    };

    if let Err(err) = app::main(&context).await {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}
