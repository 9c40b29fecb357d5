pub mod encode;
pub mod loader;
pub mod renderer;
pub mod site;
pub mod template;

pub use crate::domain::model::{Article, LoadErrorKind, Project, WidgetKind};
pub use crate::domain::ports::{Fetcher, MountPoint, RenderOutcome, RenderTarget, Widget};
pub use crate::utils::error::Result;
