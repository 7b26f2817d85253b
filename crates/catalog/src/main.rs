use std::path::PathBuf;

use catalog::module::demo_modules;
use catalog::{App, AppError};
use catalog_core::ProgramOptions;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), AppError> {
    let options = ProgramOptions {
        title: Some("catalog".to_string()),
        log_file: std::env::var_os("CATALOG_LOG").map(PathBuf::from),
        ..ProgramOptions::default()
    };

    let app = App::new(demo_modules())?;
    let app = catalog_core::run(app, options).await?;

    if let Some(request) = app.scaffold_request() {
        println!("{request}");
    }
    Ok(())
}
