mod cursor;
mod error;
mod functions;
mod traits;

pub use cursor::{Page, PageConfig, PageCursor};
pub use error::{Result, SourceError};
pub use functions::paginate;
pub use traits::PageSource;
