//! Interactive catalog browser.
//!
//! A filterable list of modules and a detail page per module, driven by the
//! [`catalog_core`] runtime. Both screens resolve keys through a
//! [`BindingTable`](catalog_widgets::BindingTable) and show contextual help
//! projected from that same table, so what the help lists is exactly what the
//! keys do.
//!
//! ```no_run
//! use catalog::{app::App, module::demo_modules};
//! use catalog_core::ProgramOptions;
//!
//! # async fn demo() -> Result<(), catalog::app::AppError> {
//! let app = App::new(demo_modules())?;
//! let app = catalog_core::run(app, ProgramOptions::default()).await?;
//! if let Some(request) = app.scaffold_request() {
//!     println!("{request}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod module;
pub mod screen;
pub mod signal;

pub use app::{App, AppError, AppMessage};
pub use module::Module;
pub use signal::{ScaffoldContext, Signal};
