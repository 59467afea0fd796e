//playground/src/main.rs
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::time::Duration;
use std::{env, io};

use playground::kernel::services::adapters::{
    default_sandbox_base, ensure_settings_file, get_projects_dir, load_settings, AppMessage,
    AsyncRuntime, BufferEditor, EnvSessionProvider, HttpSuggestionEndpoint,
    JsonProjectRepository, LocalDirRuntime, SandboxLifecycle, StyleLinter, SuggestionService,
    SyncBridge, SyncWorker, WhitespaceFormatter,
};
use playground::kernel::services::ports::{
    ContentChange, EditorCapability, Position, ProjectRecord, ProjectRepository,
    SessionProvider, Settings,
};
use playground::kernel::{Action, ExplorerState, Store, SuggestionController};
use playground::models::{TemplateFolder, TreeNode};

mod logging;

const MESSAGE_TIMEOUT: Duration = Duration::from_secs(30);

struct Options {
    source: String,
    suggest: bool,
    keep: bool,
}

fn parse_args() -> Option<Options> {
    let mut source = None;
    let mut suggest = false;
    let mut keep = false;
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--suggest" => suggest = true,
            "--keep" => keep = true,
            _ if source.is_none() => source = Some(arg),
            _ => return None,
        }
    }
    Some(Options {
        source: source?,
        suggest,
        keep,
    })
}

fn main() -> io::Result<()> {
    let _logging = logging::init();

    let Some(options) = parse_args() else {
        eprintln!("usage: playground <project.json | project-id> [--suggest] [--keep]");
        std::process::exit(2);
    };

    if let Err(e) = ensure_settings_file() {
        tracing::warn!(error = %e, "cannot create default settings file");
    }
    let settings = load_settings();
    let runtime = AsyncRuntime::new()?;

    if let Some(user) = runtime.block_on(EnvSessionProvider.current_user()) {
        tracing::info!(user = %user.id, "session user");
    }

    let (project_id, template) = runtime.block_on(load_project(&options.source))?;
    let tree = template.into_tree();
    println!("project {project_id}: {} files", tree.file_count());

    let base = settings
        .sandbox
        .root
        .clone()
        .unwrap_or_else(default_sandbox_base);
    let lifecycle = SandboxLifecycle::new(
        Arc::new(LocalDirRuntime::new(base)),
        &settings.sandbox,
        runtime.tokio_handle(),
    );
    let (tx, rx) = mpsc::channel::<AppMessage>();
    let worker = SyncWorker::spawn(
        &runtime.tokio_handle(),
        SyncBridge::new(lifecycle.clone()),
        tx.clone(),
    );

    let mut store = Store::new(ExplorerState::new(project_id));
    let result = store.dispatch(Action::SetTree(Some(tree.clone())));
    worker.submit_all(result.effects);
    report(wait_message(&runtime, &rx));

    if options.suggest {
        run_suggestion(&runtime, &settings, &mut store, &worker, &tree, tx, &rx);
    }

    if options.keep {
        println!("sandbox left in place");
    } else {
        runtime.block_on(lifecycle.force_destroy());
    }
    Ok(())
}

async fn load_project(source: &str) -> io::Result<(String, TemplateFolder)> {
    let path = Path::new(source);
    if tokio::fs::try_exists(path).await? {
        let data = tokio::fs::read_to_string(path).await?;
        if let Ok(record) = serde_json::from_str::<ProjectRecord>(&data) {
            return Ok((record.id, record.template));
        }
        let template: TemplateFolder = serde_json::from_str(&data)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let id = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| template.folder_name.clone());
        return Ok((id, template));
    }

    let dir = get_projects_dir().unwrap_or_else(|| PathBuf::from("projects"));
    let repository = JsonProjectRepository::new(dir);
    match repository.read(source).await {
        Ok(Some(record)) => Ok((record.id, record.template)),
        Ok(None) => Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("project {source} not found"),
        )),
        Err(e) => Err(io::Error::other(e)),
    }
}

fn run_suggestion(
    runtime: &AsyncRuntime,
    settings: &Settings,
    store: &mut Store,
    worker: &SyncWorker,
    tree: &TreeNode,
    tx: mpsc::Sender<AppMessage>,
    rx: &Receiver<AppMessage>,
) {
    let Some(file) = tree.files().next().cloned() else {
        println!("no files to suggest into");
        return;
    };
    store.dispatch(Action::OpenFile(file.clone()));

    let language = store
        .state()
        .active_file()
        .map(|f| f.language())
        .unwrap_or(playground::models::PLAIN_TEXT);
    let mut editor = BufferEditor::new(store.state().editor_content()).with_language(language);
    editor.register_formatting_provider(Arc::new(WhitespaceFormatter));
    editor.register_diagnostics_provider(Arc::new(StyleLinter));
    let changes = editor.subscribe_changes();
    let end = editor.text().lines().count().saturating_sub(1) as u32;
    editor.set_cursor(Position::new(end, u32::MAX));

    let mut controller = SuggestionController::new(settings.suggestions.enabled);
    let Some(pending) = controller.request_suggestion(&settings.suggestions.kind, &mut editor)
    else {
        println!("suggestions disabled");
        return;
    };

    let endpoint = Arc::new(HttpSuggestionEndpoint::new(&settings.suggestions.endpoint));
    let service = SuggestionService::new(runtime.tokio_handle(), endpoint, tx);
    service.fetch(pending);

    let Some(AppMessage::SuggestionFetched {
        generation,
        outcome,
    }) = wait_message(runtime, rx)
    else {
        println!("no suggestion response");
        return;
    };
    controller.complete(generation, outcome, &mut editor);
    if controller.accept(&mut editor).is_none() {
        println!("no suggestion available");
        return;
    }

    forward_changes(runtime, store, worker, &changes, rx);
    if let Some(active) = store.state().active_file() {
        println!(
            "{}: suggestion applied (unsaved changes: {})",
            active.path, active.has_unsaved_changes
        );
    }
    for diagnostic in editor.diagnostics() {
        println!(
            "  {}:{}:{} {} {}",
            file.path,
            diagnostic.range.start.line + 1,
            diagnostic.range.start.column + 1,
            diagnostic.severity.label(),
            diagnostic.message
        );
    }

    save_active(runtime, store, worker, &mut editor, &changes, rx);
}

/// Formats the buffer, forwards the result and marks the active file saved.
fn save_active(
    runtime: &AsyncRuntime,
    store: &mut Store,
    worker: &SyncWorker,
    editor: &mut BufferEditor,
    changes: &Receiver<ContentChange>,
    rx: &Receiver<AppMessage>,
) {
    if editor.format_document() {
        forward_changes(runtime, store, worker, changes, rx);
    }
    let Some(id) = store.state().active_file_id().cloned() else {
        return;
    };
    store.dispatch(Action::MarkSaved(id));
    if let Some(active) = store.state().active_file() {
        println!("{}: saved", active.path);
    }
}

fn forward_changes(
    runtime: &AsyncRuntime,
    store: &mut Store,
    worker: &SyncWorker,
    changes: &Receiver<ContentChange>,
    rx: &Receiver<AppMessage>,
) {
    for change in changes.try_iter() {
        let result = store.dispatch(change.into());
        let pending = result.effects.len();
        worker.submit_all(result.effects);
        for _ in 0..pending {
            report(wait_message(runtime, rx));
        }
    }
}

fn wait_message(runtime: &AsyncRuntime, rx: &Receiver<AppMessage>) -> Option<AppMessage> {
    runtime.block_on(async {
        let deadline = tokio::time::Instant::now() + MESSAGE_TIMEOUT;
        loop {
            match rx.try_recv() {
                Ok(msg) => return Some(msg),
                Err(TryRecvError::Disconnected) => return None,
                Err(TryRecvError::Empty) if tokio::time::Instant::now() >= deadline => {
                    tracing::warn!("timed out waiting for runtime message");
                    return None;
                }
                Err(TryRecvError::Empty) => tokio::time::sleep(Duration::from_millis(10)).await,
            }
        }
    })
}

fn report(msg: Option<AppMessage>) {
    match msg {
        Some(AppMessage::TreeSynced { report }) => {
            for path in &report.written {
                println!("  synced {path}");
            }
            for error in &report.failed {
                println!("  FAILED {error}");
            }
        }
        Some(AppMessage::FileSynced { path }) => println!("  synced {path}"),
        Some(AppMessage::SyncFailed { error, .. }) => println!("  FAILED {error}"),
        Some(AppMessage::SuggestionFetched { .. }) | None => {}
    }
}
