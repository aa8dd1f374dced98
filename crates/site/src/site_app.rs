use app_runtime::use_app_context;
use leptos::*;
use leptos_meta::*;
use platform_host::{SyncBatch, USER_ID_KEY};

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    let context = use_app_context();
    let initial_user = context
        .as_ref()
        .and_then(|context| context.config.user_id().map(str::to_string));
    let api_url = context
        .as_ref()
        .and_then(|context| context.config.api_url().map(str::to_string))
        .unwrap_or_else(|| "not configured".to_string());
    let sync = context.map(|context| context.sync);

    let (user_id, set_user_id) = create_signal(initial_user);
    let (draft, set_draft) = create_signal(String::new());

    let remember = {
        let sync = sync.clone();
        move |_| {
            let id = draft.get_untracked().trim().to_string();
            if id.is_empty() {
                return;
            }
            if let Some(sync) = &sync {
                sync.send(SyncBatch::new().set(USER_ID_KEY, id.clone()));
            }
            set_user_id.set(Some(id));
            set_draft.set(String::new());
        }
    };
    let forget = move |_| {
        if let Some(sync) = &sync {
            sync.send(SyncBatch::new().delete(USER_ID_KEY));
        }
        set_user_id.set(None);
    };

    view! {
        <Title text="Site" />
        <main class="site-root">
            <p class="site-user">
                {move || match user_id.get() {
                    Some(id) => format!("Signed in as {id}"),
                    None => "Not signed in".to_string(),
                }}
            </p>
            <input
                type="text"
                placeholder="User id"
                prop:value=draft
                on:input=move |ev| set_draft.set(event_target_value(&ev))
            />
            <button on:click=remember>"Remember"</button>
            <button on:click=forget>"Forget"</button>
            <p class="site-api">{format!("API: {api_url}")}</p>
        </main>
    }
}
