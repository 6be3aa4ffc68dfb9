//! Wikipedia article aggregation: title resolution, concurrent fetches
//! against the action API and the pageviews API, normalization into one
//! record, and summary markup rendering.

mod aggregate;
pub mod client;
pub mod error;
pub mod markup;
pub mod normalize;
pub mod pageviews;
pub mod types;

pub use client::{WikiClient, REVISION_LIMIT};
pub use error::{ErrorKind, FetchError, WikiError};
pub use markup::{clean_markup, cleaning_rules, render_summary, DisplayBlock, MarkupRule};
pub use normalize::{DailyViews, NormalizedArticle, PageLink};
pub use pageviews::{chart_points, PageviewPoint, PageviewWindow};
