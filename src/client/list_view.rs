use std::sync::Arc;

use askama::Template;

use crate::posts::models::{
    pagination::{PostsPage, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE},
    post::Post,
};

use super::{
    actions::{ActionError, PostActions},
    cache::{QueryCache, QueryKey},
    flash::TransientMessage,
    form::{FormError, PostForm},
    POSTS_RESOURCE,
};

const DELETED_MESSAGE: &str = "Post deleted successfully";

struct PageLink {
    number: u64,
    current: bool,
}

#[derive(Template)]
#[template(path = "posts/list.html")]
struct ListTemplate<'a> {
    message: Option<String>,
    posts: &'a [Post],
    page_links: Vec<PageLink>,
    has_previous: bool,
    has_next: bool,
    form_html: Option<String>,
}

#[derive(Template)]
#[template(source = "<div class=\"error\">Error: {{ message }}</div>", ext = "html")]
struct ErrorTemplate {
    message: String,
}

/// Paginated posts table with its add/edit panel.
///
/// Pages are loaded through the shared [`QueryCache`]; every successful
/// mutation invalidates all cached posts pages before the current page is
/// loaded again.
pub struct ListView<A: PostActions + 'static> {
    actions: Arc<A>,
    cache: Arc<QueryCache<PostsPage>>,
    page: u32,
    page_size: u32,
    data: Option<PostsPage>,
    error: Option<ActionError>,
    message: TransientMessage,
    form: Option<PostForm>,
}

impl<A: PostActions + 'static> ListView<A> {
    pub fn new(actions: Arc<A>, cache: Arc<QueryCache<PostsPage>>) -> Self {
        Self {
            actions,
            cache,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            data: None,
            error: None,
            message: TransientMessage::default(),
            form: None,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn data(&self) -> Option<&PostsPage> {
        self.data.as_ref()
    }

    pub fn posts(&self) -> &[Post] {
        match &self.data {
            Some(data) => &data.posts,
            None => &[],
        }
    }

    pub fn error(&self) -> Option<&ActionError> {
        self.error.as_ref()
    }

    pub fn message(&self) -> Option<String> {
        self.message.text()
    }

    pub fn form(&self) -> Option<&PostForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut PostForm> {
        self.form.as_mut()
    }

    pub fn is_form_open(&self) -> bool {
        self.form.is_some()
    }

    fn total_pages(&self) -> u64 {
        self.data
            .as_ref()
            .map(|data| data.pagination.total_pages)
            .unwrap_or(0)
    }

    pub fn page_numbers(&self) -> Vec<u64> {
        (1..=self.total_pages()).collect()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.page) < self.total_pages()
    }

    /// Loads the current page. A failure is kept for [`Self::render`].
    pub async fn refresh(&mut self) {
        let key = QueryKey::new(POSTS_RESOURCE, self.page, self.page_size);
        let actions = Arc::clone(&self.actions);
        let (page, page_size) = (self.page, self.page_size);

        let result = self
            .cache
            .fetch(key, move || async move {
                actions.fetch_posts(page, page_size).await
            })
            .await;

        match result {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
            }
            Err(e) => {
                tracing::error!(%e, page, page_size);
                self.error = Some(e);
            }
        }
    }

    pub async fn go_to_page(&mut self, page: u32) {
        if page == 0 {
            return;
        }

        self.page = page;
        self.refresh().await;
    }

    pub async fn next_page(&mut self) {
        if self.has_next() {
            self.go_to_page(self.page + 1).await;
        }
    }

    pub async fn previous_page(&mut self) {
        if self.has_previous() {
            self.go_to_page(self.page - 1).await;
        }
    }

    pub async fn set_page_size(&mut self, page_size: u32) {
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self.page = 1;
        self.refresh().await;
    }

    pub async fn delete(&mut self, id: i32) -> Result<(), ActionError> {
        if let Err(e) = self.actions.delete_post(id).await {
            tracing::error!(%e, id);
            return Err(e);
        }

        self.cache.invalidate_resource(POSTS_RESOURCE).await;
        self.message.show(DELETED_MESSAGE);
        self.refresh().await;

        // Removing the last row of the last page leaves us past the end.
        let total_pages = self.total_pages();
        if total_pages > 0 && u64::from(self.page) > total_pages {
            self.go_to_page(last_page(total_pages)).await;
        }

        Ok(())
    }

    pub fn open_add(&mut self) {
        self.form = Some(PostForm::new());
    }

    pub fn open_edit(&mut self, post: &Post) {
        self.form = Some(PostForm::from_post(post));
    }

    pub fn close_form(&mut self) {
        self.form = None;
    }

    /// Submits the open form. On success the panel closes and the list
    /// reloads; on failure the panel stays open with its input.
    pub async fn submit_form(&mut self) -> Result<(), FormError> {
        let Some(form) = self.form.as_mut() else {
            return Ok(());
        };

        match form.submit(self.actions.as_ref()).await {
            Ok(outcome) => {
                self.cache.invalidate_resource(POSTS_RESOURCE).await;
                self.form = None;
                self.message.show(outcome.message());
                self.refresh().await;
                Ok(())
            }
            Err(FormError::Invalid) => Err(FormError::Invalid),
            Err(e) => {
                tracing::error!(%e, "failed to submit form");
                Err(e)
            }
        }
    }

    pub fn render(&self) -> Result<String, askama::Error> {
        if let Some(error) = &self.error {
            return ErrorTemplate {
                message: error.to_string(),
            }
            .render();
        }

        let form_html = match &self.form {
            Some(form) => Some(form.render()?),
            None => None,
        };

        ListTemplate::new(
            self.posts(),
            self.page,
            self.total_pages(),
            self.message.text(),
            form_html,
        )
        .render()
    }
}

impl<'a> ListTemplate<'a> {
    fn new(
        posts: &'a [Post],
        page: u32,
        total_pages: u64,
        message: Option<String>,
        form_html: Option<String>,
    ) -> Self {
        Self {
            message,
            posts,
            page_links: (1..=total_pages)
                .map(|number| PageLink {
                    number,
                    current: number == u64::from(page),
                })
                .collect(),
            has_previous: page > 1,
            has_next: u64::from(page) < total_pages,
            form_html,
        }
    }
}

/// Renders a loaded page the way a freshly mounted view shows it: no message,
/// no open form.
pub fn render_posts_page(data: &PostsPage) -> Result<String, askama::Error> {
    ListTemplate::new(
        &data.posts,
        data.pagination.current_page,
        data.pagination.total_pages,
        None,
        None,
    )
    .render()
}

/// Page number for a page count, saturating at `u32::MAX`.
fn last_page(total_pages: u64) -> u32 {
    u32::try_from(total_pages).unwrap_or(u32::MAX)
}
