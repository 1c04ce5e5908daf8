use std::{
    net::TcpListener,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use async_trait::async_trait;

use postboard::{
    client::{
        actions::{ActionError, HttpPostActions, PostActions, PostInput},
        cache::QueryCache,
        form::FormError,
        list_view::ListView,
    },
    posts::{
        dtos::{create_post_dto::CreatePostDto, edit_post_dto::EditPostDto},
        models::{
            pagination::{Pagination, PostsPage},
            post::Post,
        },
        store::{MemoryPostStore, PostStore},
    },
    router, AppState,
};

/// In-process actions backed by the memory store.
#[derive(Default)]
struct FakeActions {
    store: MemoryPostStore,
    fetches: AtomicUsize,
    creates: AtomicUsize,
    updates: AtomicUsize,
    fail: AtomicBool,
}

impl FakeActions {
    async fn seeded(count: usize) -> Arc<Self> {
        let actions = Arc::new(Self::default());
        for i in 1..=count {
            actions
                .store
                .create_post(&CreatePostDto {
                    title: format!("title {}", i),
                    content: format!("content {}", i),
                })
                .await
                .unwrap();
        }
        actions
    }

    fn check(&self, operation: &'static str) -> Result<(), ActionError> {
        match self.fail.load(Ordering::SeqCst) {
            true => Err(ActionError::new(operation)),
            false => Ok(()),
        }
    }
}

#[async_trait]
impl PostActions for FakeActions {
    async fn fetch_posts(&self, page: u32, page_size: u32) -> Result<PostsPage, ActionError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.check("fetch posts")?;

        let posts = self
            .store
            .list_posts(Pagination::offset(page, page_size), i64::from(page_size))
            .await
            .unwrap();
        let total = self.store.count_posts().await.unwrap() as u64;

        Ok(PostsPage {
            posts,
            pagination: Pagination::new(page, page_size, total),
        })
    }

    async fn fetch_post(&self, id: i32) -> Result<Post, ActionError> {
        self.check("fetch post")?;
        self.store
            .get_post_by_id(id)
            .await
            .unwrap()
            .ok_or(ActionError::new("fetch post"))
    }

    async fn submit_post(&self, input: &PostInput) -> Result<Post, ActionError> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        self.check("submit post")?;

        let dto = CreatePostDto {
            title: input.title.to_string(),
            content: input.content.to_string(),
        };
        Ok(self.store.create_post(&dto).await.unwrap())
    }

    async fn update_post(&self, id: i32, input: &PostInput) -> Result<Post, ActionError> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        self.check("update post")?;

        let dto = EditPostDto {
            title: Some(input.title.to_string()),
            content: Some(input.content.to_string()),
        };
        self.store
            .edit_post_by_id(id, &dto)
            .await
            .unwrap()
            .ok_or(ActionError::new("update post"))
    }

    async fn delete_post(&self, id: i32) -> Result<Post, ActionError> {
        self.check("delete post")?;
        self.store
            .delete_post_by_id(id)
            .await
            .unwrap()
            .ok_or(ActionError::new("delete post"))
    }
}

async fn view(count: usize) -> (ListView<FakeActions>, Arc<FakeActions>) {
    let actions = FakeActions::seeded(count).await;
    let mut view = ListView::new(Arc::clone(&actions), Arc::new(QueryCache::new()));
    view.refresh().await;
    (view, actions)
}

fn titles(view: &ListView<FakeActions>) -> Vec<String> {
    view.posts().iter().map(|p| p.title.to_string()).collect()
}

#[tokio::test]
async fn renders_first_page_with_controls() {
    let (view, _) = view(15).await;

    assert_eq!(view.posts().len(), 10);
    assert_eq!(view.page_numbers(), vec![1, 2]);
    assert!(!view.has_previous());
    assert!(view.has_next());

    let html = view.render().unwrap();
    assert!(html.contains("<td>title 15</td>"));
    assert!(!html.contains("<td>title 5</td>"));
    assert!(html.contains(r#"data-action="previous" disabled>Previous"#));
    assert!(html.contains(r#"data-action="next">Next"#));
    assert!(html.contains(r#"data-page="1" class="current">1"#));
}

#[tokio::test]
async fn empty_list_disables_both_directions() {
    let (view, _) = view(0).await;

    assert!(view.posts().is_empty());
    assert!(view.page_numbers().is_empty());
    assert!(!view.has_previous());
    assert!(!view.has_next());
}

#[tokio::test]
async fn paging_stops_at_boundaries() {
    let (mut view, _) = view(15).await;

    view.next_page().await;
    assert_eq!(view.page(), 2);
    assert_eq!(view.posts().len(), 5);
    assert!(!view.has_next());

    view.next_page().await;
    assert_eq!(view.page(), 2);

    view.previous_page().await;
    view.previous_page().await;
    assert_eq!(view.page(), 1);

    view.go_to_page(0).await;
    assert_eq!(view.page(), 1);
}

#[tokio::test]
async fn revisiting_a_page_uses_the_cache() {
    let (mut view, actions) = view(15).await;

    view.go_to_page(2).await;
    view.go_to_page(1).await;
    view.go_to_page(2).await;

    assert_eq!(actions.fetches.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn page_size_is_clamped_and_resets_page() {
    let (mut view, _) = view(15).await;
    view.go_to_page(2).await;

    view.set_page_size(500).await;

    assert_eq!(view.page(), 1);
    assert_eq!(view.page_size(), 100);
    assert_eq!(view.posts().len(), 15);
}

#[tokio::test(start_paused = true)]
async fn delete_refetches_and_flashes_message() {
    let (mut view, actions) = view(3).await;

    view.delete(3).await.unwrap();

    assert_eq!(titles(&view), vec!["title 2", "title 1"]);
    assert_eq!(actions.fetches.load(Ordering::SeqCst), 2);
    assert_eq!(view.message().as_deref(), Some("Post deleted successfully"));
    assert!(view.render().unwrap().contains("Post deleted successfully"));

    tokio::time::sleep(Duration::from_millis(1600)).await;

    assert_eq!(view.message(), None);
}

#[tokio::test]
async fn deleting_last_row_of_last_page_steps_back() {
    let (mut view, _) = view(11).await;
    view.go_to_page(2).await;

    view.delete(1).await.unwrap();

    assert_eq!(view.page(), 1);
    assert_eq!(view.posts().len(), 10);
}

#[tokio::test]
async fn failed_delete_leaves_list_untouched() {
    let (mut view, actions) = view(3).await;
    actions.fail.store(true, Ordering::SeqCst);

    let result = view.delete(3).await;

    assert_eq!(result, Err(ActionError::new("delete post")));
    assert_eq!(view.posts().len(), 3);
    assert_eq!(view.message(), None);
}

#[tokio::test]
async fn fetch_failure_renders_error() {
    let actions = Arc::new(FakeActions::default());
    actions.fail.store(true, Ordering::SeqCst);
    let mut view = ListView::new(actions, Arc::new(QueryCache::new()));

    view.refresh().await;

    assert!(view.error().is_some());
    assert_eq!(
        view.render().unwrap(),
        r#"<div class="error">Error: Failed to fetch posts</div>"#
    );
}

#[tokio::test]
async fn empty_form_is_not_submitted() {
    let (mut view, actions) = view(1).await;
    view.open_add();

    let result = view.submit_form().await;

    assert!(matches!(result, Err(FormError::Invalid)));
    assert!(view.is_form_open());
    let form = view.form().unwrap();
    assert_eq!(form.error("title"), Some("Title is required"));
    assert_eq!(form.error("content"), Some("Content is required"));
    assert_eq!(actions.creates.load(Ordering::SeqCst), 0);
    assert!(view.render().unwrap().contains("Title is required"));
}

#[tokio::test]
async fn add_form_creates_and_closes() {
    let (mut view, actions) = view(2).await;
    view.open_add();
    let form = view.form_mut().unwrap();
    form.set_field("title", "fresh");
    form.set_field("content", "body");

    view.submit_form().await.unwrap();

    assert!(!view.is_form_open());
    assert_eq!(actions.creates.load(Ordering::SeqCst), 1);
    assert_eq!(view.posts()[0].title, "fresh");
    assert_eq!(view.message().as_deref(), Some("Post added successfully"));
}

#[tokio::test]
async fn edit_form_updates_in_place() {
    let (mut view, actions) = view(2).await;
    let post = view.posts()[1].clone();
    view.open_edit(&post);
    assert!(view.render().unwrap().contains(">Update</button>"));

    view.form_mut().unwrap().set_field("title", "edited");
    view.submit_form().await.unwrap();

    assert_eq!(actions.updates.load(Ordering::SeqCst), 1);
    assert_eq!(actions.creates.load(Ordering::SeqCst), 0);
    assert_eq!(view.posts()[1].id, post.id);
    assert_eq!(view.posts()[1].title, "edited");
    assert_eq!(view.message().as_deref(), Some("Post updated successfully"));
}

#[tokio::test]
async fn failed_submit_keeps_form_open() {
    let (mut view, actions) = view(1).await;
    view.open_add();
    let form = view.form_mut().unwrap();
    form.set_field("title", "T");
    form.set_field("content", "C");
    actions.fail.store(true, Ordering::SeqCst);

    let result = view.submit_form().await;

    assert!(matches!(result, Err(FormError::Action(_))));
    assert!(view.is_form_open());
    assert_eq!(view.form().unwrap().title, "T");
    assert_eq!(view.message(), None);
}

async fn serve() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router(AppState::new(Arc::new(MemoryPostStore::new())));

    tokio::spawn(async move {
        axum::Server::from_tcp(listener)
            .unwrap()
            .serve(app.into_make_service())
            .await
            .unwrap();
    });

    format!("http://{}", addr)
}

#[tokio::test]
async fn view_drives_the_http_api() {
    let base_url = serve().await;
    let actions = Arc::new(HttpPostActions::new(&base_url));
    let mut view = ListView::new(Arc::clone(&actions), Arc::new(QueryCache::new()));

    view.refresh().await;
    assert!(view.error().is_none());
    assert!(view.posts().is_empty());

    for title in ["first", "second"] {
        view.open_add();
        let form = view.form_mut().unwrap();
        form.set_field("title", title);
        form.set_field("content", "body");
        view.submit_form().await.unwrap();
    }
    assert_eq!(
        view.posts().iter().map(|p| p.title.as_str()).collect::<Vec<_>>(),
        vec!["second", "first"]
    );

    let first = view.posts()[1].clone();
    view.open_edit(&first);
    view.form_mut().unwrap().set_field("content", "rewritten");
    view.submit_form().await.unwrap();
    assert_eq!(actions.fetch_post(first.id).await.unwrap().content, "rewritten");

    view.delete(first.id).await.unwrap();
    assert_eq!(view.posts().len(), 1);
    assert_eq!(view.data().unwrap().pagination.total_posts, 1);

    assert_eq!(
        actions.delete_post(first.id).await,
        Err(ActionError::new("delete post"))
    );
    assert_eq!(
        actions.fetch_posts(0, 10).await,
        Err(ActionError::new("fetch posts"))
    );
}
