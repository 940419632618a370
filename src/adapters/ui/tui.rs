//! Implements InputPort. Inquire-based screens, one per route.
//!
//! Each screen fetches into a `ViewSlot`, renders, then asks where to go next.
//! Esc inside a form returns to the screen; Esc or Ctrl+C in a menu quits.

use crate::adapters::ui::{progress, render};
use crate::domain::{DomainError, NewContribution};
use crate::ports::InputPort;
use crate::usecases::{
    BlogService, DirectoryService, ForumService, LoginService, Navigation, ProfileService, Route,
    Router, ViewSlot,
};
use async_trait::async_trait;
use crossterm::style::Stylize;
use inquire::ui::{Color, RenderConfig, Styled};
use inquire::{Editor, InquireError, Password, PasswordDisplayMode, Select, Text};
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// Applies the prompt theme globally.
pub fn apply_theme() {
    let mut cfg = RenderConfig::default();
    cfg.prompt_prefix = Styled::new("›").with_fg(Color::LightCyan);
    cfg.highlighted_option_prefix = Styled::new("➤").with_fg(Color::LightYellow);
    inquire::set_global_render_config(cfg);
}

/// Entry of the per-screen menu.
#[derive(Debug, Clone, PartialEq)]
enum MenuItem {
    Open { label: String, path: String },
    AddContribution,
    NewPost,
    Nav { label: &'static str, path: &'static str },
    Logout,
    Quit,
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuItem::Open { label, .. } => write!(f, "{}", label),
            MenuItem::AddContribution => f.write_str("Add New Contribution"),
            MenuItem::NewPost => f.write_str("New Post"),
            MenuItem::Nav { label, .. } => write!(f, "[{}]", label),
            MenuItem::Logout => f.write_str("[Logout]"),
            MenuItem::Quit => f.write_str("[Quit]"),
        }
    }
}

/// Navigation bar entries shown to logged-in sessions.
const NAV_LINKS: [(&str, &str); 3] = [
    ("Legacy", "/legacy"),
    ("Forum", "/forum"),
    ("Blog", "/blog"),
];

/// What a screen asks the loop to do next.
enum Next {
    Go(String),
    Stay,
    Quit,
}

/// `None` when the user cancelled the prompt.
fn prompt<T>(result: Result<T, InquireError>) -> Result<Option<T>, DomainError> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(DomainError::Ui(e.to_string())),
    }
}

fn heading(text: &str) {
    println!("\n{}\n", text.bold().underlined());
}

fn error_line(text: &str) {
    println!("{}", text.red());
}

/// TUI adapter. Inquire prompts over the use-case services.
pub struct TuiInputPort {
    router: Arc<Router>,
    login: Arc<LoginService>,
    directory: Arc<DirectoryService>,
    profiles: Arc<ProfileService>,
    forum: Arc<ForumService>,
    blog: Arc<BlogService>,
}

impl TuiInputPort {
    pub fn new(
        router: Arc<Router>,
        login: Arc<LoginService>,
        directory: Arc<DirectoryService>,
        profiles: Arc<ProfileService>,
        forum: Arc<ForumService>,
        blog: Arc<BlogService>,
    ) -> Self {
        Self {
            router,
            login,
            directory,
            profiles,
            forum,
            blog,
        }
    }

    /// Run `fut` on the runtime with a spinner and hand the result to `slot`.
    async fn fetch<T, F>(&self, slot: &mut ViewSlot<T>, fut: F)
    where
        T: Send + 'static,
        F: Future<Output = Result<T, DomainError>> + Send + 'static,
    {
        let ticket = slot.begin();
        let pb = progress::spinner(render::LOADING);
        let result = match tokio::spawn(fut).await {
            Ok(r) => r,
            Err(e) => Err(DomainError::Ui(format!("fetch task failed: {}", e))),
        };
        pb.finish_and_clear();
        slot.apply(&self.router, ticket, result);
    }

    fn nav_items(&self) -> Vec<MenuItem> {
        let mut items = Vec::new();
        if self.router.nav_visible() {
            items.extend(NAV_LINKS.iter().map(|&(label, path)| MenuItem::Nav { label, path }));
            items.push(MenuItem::Logout);
        }
        items.push(MenuItem::Quit);
        items
    }

    /// Show `items` followed by the navigation entries.
    fn menu(&self, mut items: Vec<MenuItem>) -> Result<MenuItem, DomainError> {
        items.extend(self.nav_items());
        Ok(prompt(Select::new("Go to", items).with_page_size(12).prompt())?
            .unwrap_or(MenuItem::Quit))
    }

    /// Resolves the common menu entries; screen-specific ones come back as `None`.
    fn follow(&self, item: &MenuItem) -> Option<Next> {
        match item {
            MenuItem::Open { path, .. } => Some(Next::Go(path.clone())),
            MenuItem::Nav { path, .. } => Some(Next::Go((*path).to_string())),
            MenuItem::Logout => Some(Next::Go(self.login.logout().path())),
            MenuItem::Quit => Some(Next::Quit),
            MenuItem::AddContribution | MenuItem::NewPost => None,
        }
    }

    async fn login_screen(&self) -> Result<Next, DomainError> {
        heading("Login");
        loop {
            let Some(username) = prompt(Text::new("Username:").prompt())? else {
                return Ok(Next::Quit);
            };
            let Some(password) = prompt(
                Password::new("Password:")
                    .without_confirmation()
                    .with_display_mode(PasswordDisplayMode::Masked)
                    .prompt(),
            )?
            else {
                return Ok(Next::Quit);
            };

            match self.login.login(&username, &password).await {
                Ok(route) => return Ok(Next::Go(route.path())),
                Err(e) => error_line(&e.to_string()),
            }
        }
    }

    async fn directory_screen(&self, nav: &Navigation) -> Result<Next, DomainError> {
        let mut slot = ViewSlot::new(nav.epoch);
        let svc = Arc::clone(&self.directory);
        self.fetch(&mut slot, async move { svc.list().await }).await;

        print!("{}", render::directory(slot.state()));
        let items = slot
            .loaded()
            .map(|profiles| {
                profiles
                    .iter()
                    .map(|p| MenuItem::Open {
                        label: format!("{} ({})", p.name, p.tenure_label()),
                        path: Route::Profile(p.id.clone()).path(),
                    })
                    .collect()
            })
            .unwrap_or_default();
        let choice = self.menu(items)?;
        Ok(self.follow(&choice).unwrap_or(Next::Stay))
    }

    async fn profile_screen(&self, nav: &Navigation, id: &str) -> Result<Next, DomainError> {
        let mut slot = ViewSlot::new(nav.epoch);
        let svc = Arc::clone(&self.profiles);
        let profile_id = id.to_string();
        self.fetch(&mut slot, async move { svc.load(&profile_id).await }).await;

        loop {
            let can_contribute = self.profiles.can_contribute(id);
            print!("{}", render::profile_page(slot.state(), can_contribute));

            let mut items = Vec::new();
            if let Some(page) = slot.loaded() {
                for blog in &page.blogs {
                    items.push(MenuItem::Open {
                        label: format!("Blog: {}", blog.title),
                        path: Route::BlogPost(blog.id.clone()).path(),
                    });
                }
                if can_contribute {
                    items.push(MenuItem::AddContribution);
                }
            }

            let choice = self.menu(items)?;
            if let Some(next) = self.follow(&choice) {
                return Ok(next);
            }

            let Some(form) = contribution_form()? else {
                continue;
            };
            let Some(mut page) = slot.loaded().cloned() else {
                continue;
            };
            let svc = Arc::clone(&self.profiles);
            let profile_id = id.to_string();
            self.fetch(&mut slot, async move {
                page.contributions = svc.add_contribution(&profile_id, &form).await?;
                Ok::<_, DomainError>(page)
            })
            .await;
        }
    }

    async fn forum_screen(&self, nav: &Navigation) -> Result<Next, DomainError> {
        let mut slot = ViewSlot::new(nav.epoch);
        let svc = Arc::clone(&self.forum);
        self.fetch(&mut slot, async move { svc.list().await }).await;

        loop {
            print!("{}", render::forum(slot.state()));
            let choice = self.menu(vec![MenuItem::NewPost])?;
            if let Some(next) = self.follow(&choice) {
                return Ok(next);
            }

            let Some(title) = prompt(Text::new("Title:").prompt())? else {
                continue;
            };
            let Some(content) = long_text("Content:")? else {
                continue;
            };
            if title.is_empty() || content.is_empty() {
                error_line("Title and content are required");
                continue;
            }
            let svc = Arc::clone(&self.forum);
            self.fetch(&mut slot, async move { svc.post(&title, &content).await }).await;
        }
    }

    async fn blog_index_screen(&self, nav: &Navigation) -> Result<Next, DomainError> {
        let mut slot = ViewSlot::new(nav.epoch);
        let svc = Arc::clone(&self.blog);
        self.fetch(&mut slot, async move { svc.list().await }).await;

        print!("{}", render::blog_index(slot.state()));
        let items = slot
            .loaded()
            .map(|blogs| {
                blogs
                    .iter()
                    .map(|b| MenuItem::Open {
                        label: b.title.clone(),
                        path: Route::BlogPost(b.id.clone()).path(),
                    })
                    .collect()
            })
            .unwrap_or_default();
        let choice = self.menu(items)?;
        Ok(self.follow(&choice).unwrap_or(Next::Stay))
    }

    async fn blog_post_screen(&self, nav: &Navigation, id: &str) -> Result<Next, DomainError> {
        let mut slot = ViewSlot::new(nav.epoch);
        let svc = Arc::clone(&self.blog);
        let blog_id = id.to_string();
        self.fetch(&mut slot, async move { svc.get(&blog_id).await }).await;

        print!("{}", render::blog_post(slot.state()));
        let choice = self.menu(Vec::new())?;
        Ok(self.follow(&choice).unwrap_or(Next::Stay))
    }
}

/// Multi-line field, edited in `$EDITOR`.
fn long_text(message: &str) -> Result<Option<String>, DomainError> {
    let text = prompt(Editor::new(message).with_file_extension(".txt").prompt())?;
    Ok(text.map(|t| strip_trailing_newlines(&t)))
}

/// Editors save a final newline; inner line breaks are content.
fn strip_trailing_newlines(text: &str) -> String {
    text.trim_end_matches(['\r', '\n']).to_string()
}

/// Prompts for a new contribution. `None` if cancelled or a field was rejected.
fn contribution_form() -> Result<Option<NewContribution>, DomainError> {
    heading("Add New Contribution");
    let Some(title) = prompt(Text::new("Title:").prompt())? else {
        return Ok(None);
    };
    let Some(resource_url) = prompt(Text::new("Resource URL:").prompt())? else {
        return Ok(None);
    };
    let Some(description) = long_text("Description:")? else {
        return Ok(None);
    };
    let form = NewContribution {
        title,
        resource_url,
        description,
    };
    if let Err(e) = crate::usecases::profile_service::validate_contribution(&form) {
        error_line(&e.to_string());
        return Ok(None);
    }
    Ok(Some(form))
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self, start_path: &str) -> Result<(), DomainError> {
        let mut path = start_path.to_string();
        loop {
            let nav = self.router.navigate(&path);
            let next = match &nav.route {
                Route::Login => self.login_screen().await?,
                Route::Directory => self.directory_screen(&nav).await?,
                Route::Profile(id) => self.profile_screen(&nav, id).await?,
                Route::Forum => self.forum_screen(&nav).await?,
                Route::BlogIndex => self.blog_index_screen(&nav).await?,
                Route::BlogPost(id) => self.blog_post_screen(&nav, id).await?,
                Route::NotFound(_) => {
                    let choice = self.menu(Vec::new())?;
                    self.follow(&choice).unwrap_or(Next::Stay)
                }
            };
            match next {
                Next::Go(p) => path = p,
                Next::Stay => path = nav.route.path(),
                Next::Quit => return Ok(()),
            }
        }
    }
}
