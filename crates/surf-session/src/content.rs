//! Page bodies for the simulated browser.

/// Produces the body shown for a URL on a cache miss.
pub trait ContentSource {
    fn render(&self, url: &str) -> String;
}

/// Canned pages for a handful of well-known URLs, and a simulated 404 for
/// everything else.
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoContent;

impl ContentSource for DemoContent {
    fn render(&self, url: &str) -> String {
        let body = match url {
            "home" => {
                "| Welcome to Surf Browser!                   |\n\
                 | Start your secure browsing journey.        |\n\
                 | Powered by:                                |\n\
                 | - Serverless CloudSync Architecture        |\n\
                 | - Advanced Cybersecurity Suite             |\n\
                 | - AI-Driven Threat Detection               |\n"
            },
            "google.com" => {
                "| Welcome to Google Search!                  |\n\
                 | Search the world's information instantly.  |\n"
            },
            "openai.com" => {
                "| OpenAI - Pioneering AI Research            |\n\
                 | Explore ChatGPT, Codex & more AI tools.    |\n"
            },
            _ => {
                "| 404 Not Found!                             |\n\
                 | This is a simulated browser environment.   |\n"
            },
        };
        body.to_string()
    }
}
