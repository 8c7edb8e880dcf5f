//! News source port.

use crate::domain::article::Article;
use crate::domain::error::CuratorError;

/// One collector of raw articles (a feed, a page, a file).
///
/// No ordering or uniqueness is promised; the curator dedups and sorts.
pub trait NewsSource {
    fn name(&self) -> &str;

    fn fetch(&self, symbol: &str, days: usize) -> Result<Vec<Article>, CuratorError>;
}
