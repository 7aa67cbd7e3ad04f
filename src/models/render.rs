use serde::Serialize;

use super::Article;

const DATE_SEPARATOR: char = 'T';
const ZONE_SUFFIX: char = 'Z';

/// What a list row shows for one [`Article`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderModel {
    pub title: String,
    pub section: String,
    pub date_line: String,
    pub image_url: Option<String>,
    pub author: String,
    pub link: String,
    pub author_link: Option<String>,
}

impl From<&Article> for RenderModel {
    fn from(article: &Article) -> Self {
        Self {
            title: article.title().to_string(),
            section: article.section().to_string(),
            date_line: date_line(article.published_at()),
            image_url: article
                .has_thumbnail()
                .then(|| article.thumbnail_url().to_string()),
            author: article.author().to_string(),
            link: article.link().to_string(),
            author_link: (article.author_link() != super::CONTRIBUTOR_NOT_AVAILABLE)
                .then(|| article.author_link().to_string()),
        }
    }
}

/// `2017-06-09T10:00:00Z` becomes `2017-06-09   10:00:00`.
fn date_line(published_at: &str) -> String {
    match published_at.split_once(DATE_SEPARATOR) {
        Some((date, time)) => {
            let time = time.split(ZONE_SUFFIX).next().unwrap_or(time);
            format!("{date}   {time}")
        }
        None => published_at.to_string(),
    }
}
