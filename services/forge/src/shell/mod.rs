//! services/forge/src/shell/mod.rs
//!
//! The interactive shell: the only place work is started from. It owns the
//! session context, calls the document generator and the stores, writes each
//! new document to the output directory and publishes it to the preview listener.

pub mod command;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use colored::Colorize;
use page_forge_core::domain::{DocumentKind, GeneratedDocument};
use page_forge_core::ports::{CredentialStore, PortError, SubmissionStore};
use page_forge_core::{DocumentGenerator, SessionContext};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tokio::sync::watch;
use tracing::{error, info};

use crate::error::AppError;
use command::{parse, Command, HELP};

/// Used when `generate` is given an empty block.
pub const DEFAULT_DESCRIPTION: &str = "\
A webpage for a bakery named \"Sweet Delights\" with:
- a fixed navigation bar linking to Home, About, Menu and Contact sections, collapsing into a hamburger menu below 600px
- a hero banner with the heading \"Welcome to Sweet Delights\" and the tagline \"Freshly baked goods daily\"
- a menu section showing cupcakes, croissants and cakes in a responsive CSS grid
- a short about section on the bakery's history
- a contact section with name, email and message fields and a submit button
- a footer reading \"(c) 2025 Sweet Delights\" with placeholder social links
- white background with pastel pink (#FFB6C1) accents, smooth scrolling and hover effects
- no external dependencies or images";

const BLOCK_END: &str = ".";

/// One line of output from a shell action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Info(String),
    Warning(String),
    Error(String),
    /// Raw text such as HTML, printed as-is.
    Text(String),
}

pub struct Shell {
    submissions: Arc<dyn SubmissionStore>,
    credentials: Arc<dyn CredentialStore>,
    generator: DocumentGenerator,
    session: SessionContext,
    output_dir: PathBuf,
    preview: watch::Sender<Option<String>>,
    preview_url: String,
}

impl Shell {
    pub fn new(
        submissions: Arc<dyn SubmissionStore>,
        credentials: Arc<dyn CredentialStore>,
        generator: DocumentGenerator,
        output_dir: PathBuf,
        preview: watch::Sender<Option<String>>,
        preview_url: String,
    ) -> Self {
        Self {
            submissions,
            credentials,
            generator,
            session: SessionContext::new(),
            output_dir,
            preview,
            preview_url,
        }
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    //=====================================================================================
    // Actions
    //=====================================================================================

    pub async fn generate(&mut self, description: &str) -> Vec<Notice> {
        let result = self
            .session
            .generate(&self.generator, description)
            .await
            .cloned();
        match result {
            Ok(doc) => self.deliver(&doc, "Webpage generated.").await,
            Err(e) => vec![port_notice("Error generating webpage", e)],
        }
    }

    pub async fn edit(&mut self, instructions: &str) -> Vec<Notice> {
        let result = self
            .session
            .edit(&self.generator, instructions)
            .await
            .cloned();
        match result {
            Ok(doc) => self.deliver(&doc, "Webpage edited.").await,
            Err(e) => vec![port_notice("Error editing webpage", e)],
        }
    }

    pub fn show(&self, kind: Option<DocumentKind>) -> Vec<Notice> {
        match self.pick(kind) {
            Some(doc) => vec![Notice::Text(doc.html.clone())],
            None => vec![nothing_to_use(kind)],
        }
    }

    pub async fn save(&self, kind: Option<DocumentKind>) -> Vec<Notice> {
        match self.pick(kind) {
            Some(doc) => vec![self.download(doc).await],
            None => vec![nothing_to_use(kind)],
        }
    }

    pub async fn register(&self, username: &str, email: &str, password: &str) -> Vec<Notice> {
        match self.credentials.register(username, email, password).await {
            Ok(account) => {
                info!(id = account.id, username, "Registered account.");
                vec![Notice::Success(
                    "Registration successful. Please log in.".to_string(),
                )]
            }
            Err(PortError::DuplicateUsername(_)) => {
                vec![Notice::Error("Username already exists.".to_string())]
            }
            Err(e) => vec![Notice::Error(e.to_string())],
        }
    }

    /// Refused while someone is logged in; `logout` comes first.
    pub fn login_refusal(&self) -> Option<Notice> {
        self.session.auth().username().map(|username| {
            Notice::Warning(format!(
                "Already logged in as {username}. Use `logout` first."
            ))
        })
    }

    pub async fn login(&mut self, username: &str, password: &str) -> Vec<Notice> {
        if let Some(refusal) = self.login_refusal() {
            return vec![refusal];
        }
        if self
            .session
            .login(self.credentials.as_ref(), username, password)
            .await
        {
            vec![Notice::Success(format!("Welcome {username}!"))]
        } else {
            vec![Notice::Error("Invalid credentials".to_string())]
        }
    }

    pub fn logout(&mut self) -> Vec<Notice> {
        if !self.session.auth().is_logged_in() {
            return vec![Notice::Info("Not logged in.".to_string())];
        }
        self.session.logout();
        vec![Notice::Success("Logged out.".to_string())]
    }

    pub fn whoami(&self) -> Vec<Notice> {
        match self.session.auth().username() {
            Some(username) => vec![Notice::Info(format!("Logged in as {username}"))],
            None => vec![Notice::Info("Not logged in.".to_string())],
        }
    }

    /// Re-reads the store on every call.
    pub async fn submissions(&self) -> Vec<Notice> {
        match self.submissions.list_submissions().await {
            Ok(subs) if subs.is_empty() => {
                vec![Notice::Info("No submissions found.".to_string())]
            }
            Ok(subs) => subs
                .into_iter()
                .map(|sub| {
                    Notice::Text(format!(
                        "ID: {}, Name: {}, Email: {}, Message: {}, Submitted: {}",
                        sub.id,
                        sub.name,
                        sub.email,
                        sub.message,
                        sub.submitted_at.format("%Y-%m-%d %H:%M:%S")
                    ))
                })
                .collect(),
            Err(e) => {
                error!("Fetch submissions error: {}", e);
                vec![Notice::Error(format!("Error fetching submissions: {e}"))]
            }
        }
    }

    pub async fn test_insert(&self) -> Vec<Notice> {
        match self
            .submissions
            .insert_submission("Test User", "test@example.com", "Test Message")
            .await
        {
            Ok(_) => vec![Notice::Success(
                "Test submission inserted successfully.".to_string(),
            )],
            Err(e) => {
                error!("Test insert error: {}", e);
                vec![Notice::Error(format!("Error inserting test submission: {e}"))]
            }
        }
    }

    //=====================================================================================
    // Helpers
    //=====================================================================================

    fn pick(&self, kind: Option<DocumentKind>) -> Option<&GeneratedDocument> {
        match kind {
            Some(kind) => self.session.document(kind),
            None => self.session.latest(),
        }
    }

    /// Writes the document out, refreshes the preview and reports both.
    async fn deliver(&self, doc: &GeneratedDocument, headline: &str) -> Vec<Notice> {
        self.preview.send_replace(Some(doc.html.clone()));
        vec![
            Notice::Success(format!(
                "{headline} {} ({} characters)",
                doc.produced_at.format("%H:%M:%S UTC"),
                doc.html.len()
            )),
            self.download(doc).await,
            Notice::Info(format!("Preview: {}", self.preview_url)),
            Notice::Info(format!(
                "Contact form posts to {}",
                self.generator.contact_endpoint()
            )),
            Notice::Info(format!("Type `show {}` to print the HTML.", doc.kind.label())),
        ]
    }

    async fn download(&self, doc: &GeneratedDocument) -> Notice {
        let path = download_path(&self.output_dir, doc.kind);
        match tokio::fs::write(&path, doc.html.as_bytes()).await {
            Ok(()) => Notice::Info(format!("Saved {}", path.display())),
            Err(e) => {
                error!("Failed to write {}: {}", path.display(), e);
                Notice::Error(format!("Could not save {}: {e}", path.display()))
            }
        }
    }

    //=====================================================================================
    // REPL
    //=====================================================================================

    /// Runs the read-eval-print loop until `/quit`, Ctrl+C or Ctrl+D.
    pub async fn run(mut self) -> Result<(), AppError> {
        let mut rl = DefaultEditor::new()?;

        println!("{}", "Prompt-Based Webpage Generator and Editor".bold().green());
        println!("Type {} for commands, {} to exit.\n", "help".yellow(), "/quit".yellow());

        let prompt = format!("{}> ", "forge".green());
        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    let _ = rl.add_history_entry(&line);

                    let command = match parse(&line) {
                        Ok(Some(command)) => command,
                        Ok(None) => continue,
                        Err(e) => {
                            render(&[Notice::Warning(e.to_string())]);
                            continue;
                        }
                    };
                    if command == Command::Quit {
                        break;
                    }
                    let notices = self.dispatch(command, &mut rl).await;
                    render(&notices);
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(e) => {
                    eprintln!("{}: {e}", "error".red());
                    break;
                }
            }
        }
        Ok(())
    }

    async fn dispatch(&mut self, command: Command, rl: &mut DefaultEditor) -> Vec<Notice> {
        match command {
            Command::Generate(Some(description)) => self.generate(&description).await,
            Command::Generate(None) => match read_block(rl) {
                Ok(block) if block.trim().is_empty() => {
                    println!("{}", "Using the default bakery prompt.".dimmed());
                    self.generate(DEFAULT_DESCRIPTION).await
                }
                Ok(block) => self.generate(&block).await,
                Err(e) => vec![Notice::Error(e.to_string())],
            },
            Command::Edit(instructions) => self.edit(&instructions).await,
            Command::Show(kind) => self.show(kind),
            Command::Save(kind) => self.save(kind).await,
            Command::Register { username, email } => match read_password() {
                Ok(password) => self.register(&username, &email, &password).await,
                Err(e) => vec![Notice::Error(e.to_string())],
            },
            Command::Login { username } => {
                if let Some(refusal) = self.login_refusal() {
                    return vec![refusal];
                }
                match read_password() {
                    Ok(password) => self.login(&username, &password).await,
                    Err(e) => vec![Notice::Error(e.to_string())],
                }
            }
            Command::Logout => self.logout(),
            Command::WhoAmI => self.whoami(),
            Command::Submissions => self.submissions().await,
            Command::TestInsert => self.test_insert().await,
            Command::Help => vec![Notice::Text(HELP.to_string())],
            Command::Quit => Vec::new(),
        }
    }
}

fn port_notice(context: &str, error: PortError) -> Notice {
    match error {
        PortError::Validation(message) => Notice::Warning(message),
        other => Notice::Error(format!("{context}: {other}")),
    }
}

fn nothing_to_use(kind: Option<DocumentKind>) -> Notice {
    match kind {
        Some(kind) => Notice::Warning(format!("There is no {} webpage yet.", kind.label())),
        None => Notice::Warning("Please generate a webpage first.".to_string()),
    }
}

/// Reads lines until a lone `.` (or end of input).
fn read_block(rl: &mut DefaultEditor) -> Result<String, ReadlineError> {
    println!(
        "{}",
        format!("Describe the webpage. End with a line containing only `{BLOCK_END}` (empty uses the default).")
            .dimmed()
    );
    let mut lines = Vec::new();
    loop {
        match rl.readline("... ") {
            Ok(line) if line.trim() == BLOCK_END => break,
            Ok(line) => lines.push(line),
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e),
        }
    }
    Ok(lines.join("\n"))
}

fn read_password() -> std::io::Result<String> {
    rpassword::prompt_password("Password: ")
}

pub fn render(notices: &[Notice]) {
    for notice in notices {
        match notice {
            Notice::Success(text) => println!("{}", text.green()),
            Notice::Info(text) => println!("{}", text.cyan()),
            Notice::Warning(text) => println!("{}", text.yellow()),
            Notice::Error(text) => eprintln!("{}: {text}", "error".red()),
            Notice::Text(text) => println!("{text}"),
        }
    }
}

/// Where a kind of document lands when downloaded into `dir`.
pub fn download_path(dir: &Path, kind: DocumentKind) -> PathBuf {
    dir.join(kind.file_name())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::db::tests::memory_adapter;
    use crate::adapters::DbAdapter;
    use async_trait::async_trait;
    use page_forge_core::ports::{PortResult, TextGenerationService};
    use std::sync::Mutex;

    /// Answers every instruction with a numbered page.
    struct NumberedPages {
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl TextGenerationService for NumberedPages {
        async fn generate_text(&self, instruction: &str) -> PortResult<String> {
            let mut calls = self.calls.lock().unwrap();
            calls.push(instruction.to_string());
            Ok(format!("<html>page {}</html>", calls.len()))
        }
    }

    struct Fixture {
        shell: Shell,
        db: DbAdapter,
        preview: watch::Receiver<Option<String>>,
        dir: tempfile::TempDir,
    }

    async fn fixture() -> Fixture {
        let db = memory_adapter().await;
        let dir = tempfile::tempdir().unwrap();
        let (tx, rx) = watch::channel(None);
        let service = Arc::new(NumberedPages {
            calls: Mutex::new(Vec::new()),
        });
        let shell = Shell::new(
            Arc::new(db.clone()),
            Arc::new(db.clone()),
            DocumentGenerator::new(service, "http://localhost:8000/api/contact"),
            dir.path().to_path_buf(),
            tx,
            "http://localhost:9000/".to_string(),
        );
        Fixture {
            shell,
            db,
            preview: rx,
            dir,
        }
    }

    #[tokio::test]
    async fn generate_downloads_and_publishes_the_page() {
        let mut f = fixture().await;

        let notices = f.shell.generate("a bakery").await;

        let stamp = f.shell.session().generated().unwrap().produced_at;
        assert_eq!(
            notices[0],
            Notice::Success(format!(
                "Webpage generated. {} (19 characters)",
                stamp.format("%H:%M:%S UTC")
            ))
        );
        assert!(notices.contains(&Notice::Info(
            "Contact form posts to http://localhost:8000/api/contact".to_string()
        )));
        let saved = download_path(f.dir.path(), DocumentKind::Generated);
        assert_eq!(std::fs::read_to_string(saved).unwrap(), "<html>page 1</html>");
        assert_eq!(f.preview.borrow().as_deref(), Some("<html>page 1</html>"));
    }

    #[tokio::test]
    async fn edit_before_generate_is_a_warning() {
        let mut f = fixture().await;

        let notices = f.shell.edit("make it pink").await;

        assert!(matches!(notices.as_slice(), [Notice::Warning(_)]));
        assert!(f.shell.session().edited().is_none());
        assert!(!download_path(f.dir.path(), DocumentKind::Edited).exists());
        assert!(f.preview.borrow().is_none());
    }

    #[tokio::test]
    async fn edit_writes_the_edited_file_and_show_prefers_it() {
        let mut f = fixture().await;
        f.shell.generate("a bakery").await;
        f.shell.edit("make it pink").await;

        let edited = download_path(f.dir.path(), DocumentKind::Edited);
        assert_eq!(std::fs::read_to_string(edited).unwrap(), "<html>page 2</html>");
        assert_eq!(
            f.shell.show(None),
            vec![Notice::Text("<html>page 2</html>".to_string())]
        );
        assert_eq!(
            f.shell.show(Some(DocumentKind::Generated)),
            vec![Notice::Text("<html>page 1</html>".to_string())]
        );
    }

    #[tokio::test]
    async fn submissions_view_reads_fresh_rows_each_time() {
        let f = fixture().await;
        assert_eq!(
            f.shell.submissions().await,
            vec![Notice::Info("No submissions found.".to_string())]
        );

        f.shell.test_insert().await;
        f.db.insert_submission("Ann", "ann@example.com", "Hi").await.unwrap();

        let notices = f.shell.submissions().await;
        assert_eq!(notices.len(), 2);
        match &notices[0] {
            Notice::Text(line) => assert!(line.starts_with(
                "ID: 1, Name: Test User, Email: test@example.com, Message: Test Message, Submitted: "
            )),
            other => panic!("unexpected notice {other:?}"),
        }
    }

    #[tokio::test]
    async fn register_login_and_logout() {
        let mut f = fixture().await;

        assert!(matches!(
            f.shell.register("alice", "alice@example.com", "pw").await[0],
            Notice::Success(_)
        ));
        assert_eq!(
            f.shell.register("alice", "alice@example.com", "pw").await,
            vec![Notice::Error("Username already exists.".to_string())]
        );

        assert_eq!(
            f.shell.login("alice", "nope").await,
            vec![Notice::Error("Invalid credentials".to_string())]
        );
        assert_eq!(
            f.shell.login("alice", "pw").await,
            vec![Notice::Success("Welcome alice!".to_string())]
        );
        assert!(matches!(
            f.shell.login("alice", "pw").await[0],
            Notice::Warning(_)
        ));

        f.shell.logout();
        assert!(!f.shell.session().auth().is_logged_in());
    }
}
