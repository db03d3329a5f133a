use std::collections::HashMap;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{FcError, Result};
use crate::settings::Settings;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PageRef {
    pub ns: i32,
    pub title: String,
}

#[cfg(test)]
impl PageRef {
    pub fn new(ns: i32, title: impl Into<String>) -> Self {
        Self {
            ns,
            title: title.into(),
        }
    }
}

/// Everything the pipeline reads from or writes to the wiki.
pub trait Wiki {
    /// Outgoing links of `title` in `namespaces`. Fails if the page does not exist.
    fn links(&self, title: &str, namespaces: &[i32]) -> Result<Vec<PageRef>>;

    /// Which of `targets` the page `title` links to, in API listing order.
    /// A missing page links to nothing.
    fn links_among(&self, title: &str, targets: &[String]) -> Result<Vec<String>>;

    /// Categories of `title` limited to `among`; `None` if the page does not exist.
    fn categories(&self, title: &str, among: &[&str]) -> Result<Option<Vec<String>>>;

    /// Non-redirect pages in `namespace` embedding `file`; `None` if the file
    /// has no page id of its own.
    fn file_usage(&self, file: &str, namespace: i32) -> Result<Option<Vec<String>>>;

    /// Rendered HTML of a page.
    fn page_html(&self, title: &str) -> Result<String>;

    fn save_page(&self, title: &str, text: &str, summary: &str) -> Result<()>;
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    query: Option<QueryBody>,
    #[serde(rename = "continue")]
    cont: Option<HashMap<String, Value>>,
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    code: String,
    info: String,
}

#[derive(Debug, Deserialize)]
struct QueryBody {
    #[serde(default)]
    pages: Vec<ApiPage>,
}

#[derive(Debug, Deserialize)]
struct ApiPage {
    pageid: Option<i64>,
    title: String,
    #[serde(default)]
    missing: bool,
    #[serde(default)]
    invalid: bool,
    #[serde(default)]
    links: Vec<PageRef>,
    #[serde(default)]
    categories: Vec<PageRef>,
    #[serde(default)]
    fileusage: Vec<PageRef>,
}

impl ApiPage {
    fn exists(&self) -> bool {
        !self.missing && !self.invalid
    }

    /// Merge the props of a continuation batch.
    fn absorb(&mut self, next: ApiPage) {
        self.links.extend(next.links);
        self.categories.extend(next.categories);
        self.fileusage.extend(next.fileusage);
    }
}

type Continuation = HashMap<String, String>;

/// MediaWiki Action API client. Blocking, one request at a time.
pub struct WikiClient {
    http: Client,
    api_url: String,
    index_url: String,
    username: Option<String>,
    password: Option<String>,
}

impl WikiClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        let http = Client::builder()
            .user_agent(settings.user_agent.clone())
            .timeout(Duration::from_secs(settings.timeout_secs))
            .cookie_store(true)
            .build()?;
        Ok(Self {
            http,
            api_url: settings.api_url.clone(),
            index_url: settings.index_url.clone(),
            username: settings.username.clone(),
            password: settings.password.clone(),
        })
    }

    /// Run a single-title `action=query`, following continuation.
    fn query_page(&self, params: &[(&str, &str)]) -> Result<ApiPage> {
        let (mut page, mut cont) = self.query_batch(params, None)?;
        while let Some(c) = cont {
            let (next, more) = self.query_batch(params, Some(&c))?;
            page.absorb(next);
            cont = more;
        }
        Ok(page)
    }

    fn query_batch(
        &self,
        params: &[(&str, &str)],
        cont: Option<&Continuation>,
    ) -> Result<(ApiPage, Option<Continuation>)> {
        let mut req = self
            .http
            .get(&self.api_url)
            .query(&[("action", "query"), ("format", "json"), ("formatversion", "2")])
            .query(params);
        if let Some(c) = cont {
            req = req.query(c);
        }
        debug!("API query {:?}", params);
        let resp: QueryResponse = req.send()?.error_for_status()?.json()?;

        if let Some(err) = resp.error {
            return Err(FcError::Api {
                code: err.code,
                info: err.info,
            });
        }
        let page = resp
            .query
            .and_then(|q| q.pages.into_iter().next())
            .ok_or_else(|| FcError::Api {
                code: "nopages".into(),
                info: format!("no page in response to {:?}", params),
            })?;
        let cont = resp.cont.map(|c| {
            c.into_iter()
                .map(|(k, v)| match v {
                    Value::String(s) => (k, s),
                    other => (k, other.to_string()),
                })
                .collect()
        });
        Ok((page, cont))
    }

    fn token(&self, kind: &str) -> Result<String> {
        let resp: Value = self
            .http
            .get(&self.api_url)
            .query(&[
                ("action", "query"),
                ("meta", "tokens"),
                ("type", kind),
                ("format", "json"),
                ("formatversion", "2"),
            ])
            .send()?
            .error_for_status()?
            .json()?;
        check_api_error(&resp)?;
        resp["query"]["tokens"][format!("{}token", kind)]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| FcError::Api {
                code: "notoken".into(),
                info: format!("no {} token in response", kind),
            })
    }

    fn login(&self) -> Result<()> {
        let (user, pass) = match (&self.username, &self.password) {
            (Some(u), Some(p)) => (u.as_str(), p.as_str()),
            _ => {
                return Err(FcError::Login(
                    "FCI_USERNAME and FCI_PASSWORD must be set to publish".into(),
                ))
            }
        };
        let token = self.token("login")?;
        let resp: Value = self
            .http
            .post(&self.api_url)
            .form(&[
                ("action", "login"),
                ("format", "json"),
                ("formatversion", "2"),
                ("lgname", user),
                ("lgpassword", pass),
                ("lgtoken", token.as_str()),
            ])
            .send()?
            .error_for_status()?
            .json()?;
        check_api_error(&resp)?;

        match resp["login"]["result"].as_str() {
            Some("Success") => {
                info!("Logged in as {}", user);
                Ok(())
            }
            other => Err(FcError::Login(
                resp["login"]["reason"]
                    .as_str()
                    .or(other)
                    .unwrap_or("no result in login response")
                    .to_string(),
            )),
        }
    }
}

fn check_api_error(resp: &Value) -> Result<()> {
    match resp.get("error") {
        Some(err) => Err(FcError::Api {
            code: err["code"].as_str().unwrap_or_default().to_string(),
            info: err["info"].as_str().unwrap_or_default().to_string(),
        }),
        None => Ok(()),
    }
}

impl Wiki for WikiClient {
    fn links(&self, title: &str, namespaces: &[i32]) -> Result<Vec<PageRef>> {
        let ns = join_namespaces(namespaces);
        let page = self.query_page(&[
            ("prop", "links"),
            ("titles", title),
            ("plnamespace", ns.as_str()),
            ("pllimit", "max"),
        ])?;
        if !page.exists() {
            return Err(FcError::PageNotFound(page.title));
        }
        Ok(page.links)
    }

    fn links_among(&self, title: &str, targets: &[String]) -> Result<Vec<String>> {
        let targets = targets.join("|");
        let page = self.query_page(&[
            ("prop", "links"),
            ("titles", title),
            ("pltitles", targets.as_str()),
            ("pllimit", "max"),
        ])?;
        Ok(page.links.into_iter().map(|l| l.title).collect())
    }

    fn categories(&self, title: &str, among: &[&str]) -> Result<Option<Vec<String>>> {
        let among = among.join("|");
        let page = self.query_page(&[
            ("prop", "categories"),
            ("titles", title),
            ("clcategories", among.as_str()),
            ("cllimit", "max"),
        ])?;
        if !page.exists() {
            return Ok(None);
        }
        Ok(Some(page.categories.into_iter().map(|c| c.title).collect()))
    }

    fn file_usage(&self, file: &str, namespace: i32) -> Result<Option<Vec<String>>> {
        let ns = namespace.to_string();
        let page = self.query_page(&[
            ("prop", "fileusage"),
            ("titles", file),
            ("funamespace", ns.as_str()),
            ("fushow", "!redirect"),
            ("fulimit", "max"),
        ])?;
        if page.pageid.is_none() {
            return Ok(None);
        }
        Ok(Some(page.fileusage.into_iter().map(|u| u.title).collect()))
    }

    fn page_html(&self, title: &str) -> Result<String> {
        let resp = self.http.get(&self.index_url).query(&[("title", title)]).send()?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Err(FcError::PageNotFound(title.to_string()));
        }
        Ok(resp.error_for_status()?.text()?)
    }

    fn save_page(&self, title: &str, text: &str, summary: &str) -> Result<()> {
        self.login()?;
        let csrf = self.token("csrf")?;
        let resp: Value = self
            .http
            .post(&self.api_url)
            .form(&[
                ("action", "edit"),
                ("format", "json"),
                ("formatversion", "2"),
                ("title", title),
                ("text", text),
                ("summary", summary),
                ("token", csrf.as_str()),
            ])
            .send()?
            .error_for_status()?
            .json()?;
        check_api_error(&resp)?;

        match resp["edit"]["result"].as_str() {
            Some("Success") => {
                info!("Saved {}", title);
                Ok(())
            }
            other => Err(FcError::Api {
                code: "editfailed".into(),
                info: format!("edit of {} returned {:?}", title, other),
            }),
        }
    }
}

fn join_namespaces(namespaces: &[i32]) -> String {
    namespaces
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join("|")
}
