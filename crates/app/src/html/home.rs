use askama::Template;

use super::footer::{SOCIAL_LINKS, SocialLink};

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub links: &'static [SocialLink],
}

impl Default for HomeTemplate {
    fn default() -> Self {
        Self {
            links: SOCIAL_LINKS,
        }
    }
}

pub fn render_home() -> askama::Result<String> {
    HomeTemplate::default().render()
}
