//! LMS Admin Console - Library Management System
//!
//! Interactive terminal front-end over the client services: librarians log
//! in, manage the catalog and borrowers, and review the dashboard.

use std::io::Write;

use chrono::NaiveDate;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use validator::Validate;

use lms_console::{
    config::AppConfig,
    models::{
        author::{CreateAuthor, UpdateAuthor},
        book::{CreateBook, UpdateBook},
        student::{CreateStudent, UpdateStudent},
        transaction::{CreateTransaction, TransactionType},
    },
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("lms_console={}", config.logging.level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting LMS Console v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Backend: {}", config.api.base_url);

    let mut state = AppState::new(config)?;

    run_console(&mut state).await
}

async fn run_console(state: &mut AppState) -> anyhow::Result<()> {
    let mut auth_watch = state.session.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    match &state.services.auth.state().user {
        Some(user) => println!("Welcome back, {}.", user.user_name),
        None => println!("Welcome. Login to get started."),
    }
    print_help();

    loop {
        print!("lms> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let args = split_args(&line);
        let Some(command) = args.first() else {
            continue;
        };

        match command.as_str() {
            "quit" | "exit" => break,
            "help" => print_help(),
            "login" => handle_login(state, &args[1..]).await,
            "logout" => state.services.auth.logout(),
            "whoami" => handle_whoami(state),
            "authors" => handle_authors(state, &args[1..]).await,
            "books" => handle_books(state, &args[1..]).await,
            "students" => handle_students(state, &args[1..]).await,
            "transactions" => handle_transactions(state, &args[1..]).await,
            "dashboard" => handle_dashboard(state).await,
            "notify" => handle_notify(state).await,
            other => println!("Unknown command '{}'; try 'help'", other),
        }

        // The HTTP layer clears the session when a refresh fails; surface
        // the forced logout instead of failing the next command silently.
        if auth_watch.has_changed().unwrap_or(false) && !*auth_watch.borrow_and_update() {
            state.services.auth.check_auth();
            println!("Session expired. Please login again.");
        }
    }

    println!("Bye.");
    Ok(())
}

/// Every protected command passes through here before touching a service.
fn guard(state: &AppState) -> bool {
    match state.services.auth.require_authenticated() {
        Ok(()) => true,
        Err(e) => {
            println!("{}", e);
            false
        }
    }
}

async fn handle_login(state: &mut AppState, args: &[String]) {
    let [user_name, password] = args else {
        println!("Usage: login <username> <password>");
        return;
    };
    match state.services.auth.login(user_name, password).await {
        Ok(()) => {
            if let Some(user) = &state.services.auth.state().user {
                println!("Logged in as {}.", user.user_name);
            }
        }
        Err(_) => {
            if let Some(error) = &state.services.auth.state().error {
                println!("{}", error);
            }
        }
    }
}

fn handle_whoami(state: &AppState) {
    match &state.services.auth.state().user {
        Some(user) => println!("{} (id {})", user.user_name, user.id),
        None => println!("Not logged in."),
    }
}

async fn handle_authors(state: &mut AppState, args: &[String]) {
    if !guard(state) {
        return;
    }
    let authors = &mut state.services.authors;
    match args.first().map(String::as_str) {
        Some("list") => {
            if let Err(e) = authors.fetch_all().await {
                println!("{}", e);
                return;
            }
            println!("{:>5}  {:<28} BIO", "ID", "NAME");
            for author in &authors.state().items {
                println!("{:>5}  {:<28} {}", author.id, author.name, author.bio);
            }
        }
        Some("add") if args.len() >= 3 => {
            let author = CreateAuthor {
                name: args[1].clone(),
                bio: args[2].clone(),
            };
            if report_validation(author.validate()) {
                return;
            }
            report(authors.add(author).await, "Author created.");
        }
        Some("update") if args.len() >= 4 => {
            let Some(id) = parse_id(&args[1]) else { return };
            let author = UpdateAuthor {
                name: Some(args[2].clone()),
                bio: Some(args[3].clone()),
            };
            if report_validation(author.validate()) {
                return;
            }
            report(authors.update(id, author).await, "Author updated.");
        }
        Some("rm") if args.len() >= 2 => {
            let Some(id) = parse_id(&args[1]) else { return };
            report(authors.delete(id).await, "Author deleted.");
        }
        _ => println!(
            "Usage: authors list | add \"<name>\" \"<bio>\" | update <id> \"<name>\" \"<bio>\" | rm <id>"
        ),
    }
}

async fn handle_books(state: &mut AppState, args: &[String]) {
    if !guard(state) {
        return;
    }
    let books = &mut state.services.books;
    match args.first().map(String::as_str) {
        Some("list") => {
            if let Err(e) = books.fetch_all().await {
                println!("{}", e);
                return;
            }
            println!(
                "{:>5}  {:<32} {:>6}  {:<16} {:<14} {:>4}",
                "ID", "TITLE", "AUTHOR", "GENRE", "ISBN", "QTY"
            );
            for book in &books.state().items {
                println!(
                    "{:>5}  {:<32} {:>6}  {:<16} {:<14} {:>4}",
                    book.id, book.title, book.author, book.genre, book.isbn, book.quantity
                );
            }
        }
        Some("add") if args.len() >= 6 => {
            let Some(author) = parse_id(&args[2]) else { return };
            let Some(quantity) = parse_id(&args[5]) else { return };
            let book = CreateBook {
                title: args[1].clone(),
                author,
                genre: args[3].clone(),
                isbn: args[4].clone(),
                quantity,
            };
            if report_validation(book.validate()) {
                return;
            }
            report(books.add(book).await, "Book created.");
        }
        Some("update") if args.len() >= 7 => {
            let Some(id) = parse_id(&args[1]) else { return };
            let Some(author) = parse_id(&args[3]) else { return };
            let Some(quantity) = parse_id(&args[6]) else { return };
            let book = UpdateBook {
                title: Some(args[2].clone()),
                author: Some(author),
                genre: Some(args[4].clone()),
                isbn: Some(args[5].clone()),
                quantity: Some(quantity),
            };
            if report_validation(book.validate()) {
                return;
            }
            report(books.update(id, book).await, "Book updated.");
        }
        Some("rm") if args.len() >= 2 => {
            let Some(id) = parse_id(&args[1]) else { return };
            report(books.delete(id).await, "Book deleted.");
        }
        _ => println!(
            "Usage: books list | add \"<title>\" <author-id> \"<genre>\" <isbn> <qty> | update <id> \"<title>\" <author-id> \"<genre>\" <isbn> <qty> | rm <id>"
        ),
    }
}

async fn handle_students(state: &mut AppState, args: &[String]) {
    if !guard(state) {
        return;
    }
    let students = &mut state.services.students;
    match args.first().map(String::as_str) {
        Some("list") => {
            if let Err(e) = students.fetch_all().await {
                println!("{}", e);
                return;
            }
            println!(
                "{:>5}  {:<24} {:<28} {:<15} DEPARTMENT",
                "ID", "NAME", "EMAIL", "CONTACT"
            );
            for student in &students.state().items {
                println!(
                    "{:>5}  {:<24} {:<28} {:<15} {}",
                    student.student_id,
                    student.name,
                    student.email,
                    student.contact_number,
                    student.department
                );
            }
        }
        Some("add") if args.len() >= 5 => {
            let student = CreateStudent {
                name: args[1].clone(),
                email: args[2].clone(),
                contact_number: args[3].clone(),
                department: args[4].clone(),
            };
            if report_validation(student.validate()) {
                return;
            }
            report(students.add(student).await, "Student created.");
        }
        Some("update") if args.len() >= 6 => {
            let Some(id) = parse_id(&args[1]) else { return };
            let student = UpdateStudent {
                name: Some(args[2].clone()),
                email: Some(args[3].clone()),
                contact_number: Some(args[4].clone()),
                department: Some(args[5].clone()),
            };
            if report_validation(student.validate()) {
                return;
            }
            report(students.update(id, student).await, "Student updated.");
        }
        Some("rm") if args.len() >= 2 => {
            let Some(id) = parse_id(&args[1]) else { return };
            report(students.delete(id).await, "Student deleted.");
        }
        _ => println!(
            "Usage: students list | add \"<name>\" <email> <contact> \"<department>\" | update <id> \"<name>\" <email> <contact> \"<department>\" | rm <id>"
        ),
    }
}

async fn handle_transactions(state: &mut AppState, args: &[String]) {
    if !guard(state) {
        return;
    }
    match args.first().map(String::as_str) {
        Some("list") => {
            if let Err(e) = state.services.transactions.fetch_all().await {
                println!("{}", e);
                return;
            }
            println!(
                "{:>5}  {:<7} {:<28} {:<22} {:<12} OVERDUE",
                "ID", "TYPE", "BOOK", "STUDENT", "DUE"
            );
            for tx in &state.services.transactions.state().items {
                println!(
                    "{:>5}  {:<7} {:<28} {:<22} {:<12} {}",
                    tx.transaction_id,
                    tx.transaction_type.to_string(),
                    tx.book_name,
                    tx.student_name,
                    tx.due_date.format("%Y-%m-%d").to_string(),
                    if tx.is_overdue { "yes" } else { "" }
                );
            }
        }
        Some(kind @ ("borrow" | "return")) if args.len() >= 3 => {
            let Some(librarian) = librarian_id(state) else {
                return;
            };
            let Some(student) = parse_id(&args[1]) else { return };
            let Some(book) = parse_id(&args[2]) else { return };
            let due_date = match args.get(3) {
                Some(raw) => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
                    Ok(date) => Some(date),
                    Err(_) => {
                        println!("Invalid date '{}'; expected YYYY-MM-DD", raw);
                        return;
                    }
                },
                None => None,
            };
            let transaction = CreateTransaction {
                student,
                user: librarian,
                book,
                transaction_type: if kind == "borrow" {
                    TransactionType::Borrow
                } else {
                    TransactionType::Return
                },
                borrowed_date: None,
                due_date,
            };
            report(
                state.services.transactions.add(transaction).await,
                "Transaction recorded.",
            );
        }
        Some("rm") if args.len() >= 2 => {
            let Some(id) = parse_id(&args[1]) else { return };
            report(
                state.services.transactions.delete(id).await,
                "Transaction deleted.",
            );
        }
        _ => println!(
            "Usage: transactions list | borrow <student-id> <book-id> [<due YYYY-MM-DD>] | return <student-id> <book-id> | rm <id>"
        ),
    }
}

async fn handle_dashboard(state: &mut AppState) {
    if !guard(state) {
        return;
    }
    if let Err(e) = state.services.dashboard.fetch_data().await {
        println!("{}", e);
        return;
    }
    let data = &state.services.dashboard.state().data;
    println!("Books in catalog:   {}", data.summary.total_books);
    println!("Currently borrowed: {}", data.summary.total_borrowed_books);
    println!("Returned:           {}", data.summary.total_returned_books);
    println!("Students:           {}", data.summary.total_students);
    if data.overdue_borrowers.is_empty() {
        println!("No overdue borrowers.");
    } else {
        println!("Overdue borrowers:");
        for borrower in &data.overdue_borrowers {
            println!(
                "  #{:<5} {}",
                borrower.transaction_id, borrower.student_name
            );
        }
    }
}

async fn handle_notify(state: &mut AppState) {
    if !guard(state) {
        return;
    }
    match state.services.dashboard.send_notifications(None).await {
        Ok(()) => {
            if let Some(message) = &state.services.dashboard.state().notification.message {
                println!("{}", message);
            }
        }
        Err(e) => println!("{}", e),
    }
}

/// The librarian id travels on every transaction; it comes from the login
/// response cached in the auth state.
fn librarian_id(state: &AppState) -> Option<i32> {
    let user = state.services.auth.state().user.as_ref()?;
    match user.id.parse() {
        Ok(id) => Some(id),
        Err(_) => {
            println!("Stored librarian id '{}' is not numeric.", user.id);
            None
        }
    }
}

fn parse_id(raw: &str) -> Option<i32> {
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            println!("Expected a number, got '{}'", raw);
            None
        }
    }
}

fn report<E: std::fmt::Display>(outcome: Result<(), E>, success: &str) {
    match outcome {
        Ok(()) => println!("{}", success),
        Err(e) => println!("{}", e),
    }
}

/// Print field-level validation errors; true when there were any.
fn report_validation(outcome: Result<(), validator::ValidationErrors>) -> bool {
    let Err(errors) = outcome else {
        return false;
    };
    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            match &error.message {
                Some(message) => println!("{}: {}", field, message),
                None => println!("{}: invalid value", field),
            }
        }
    }
    true
}

fn print_help() {
    println!("Commands:");
    println!("  login <username> <password> / logout / whoami");
    println!("  authors|books|students list, add, update, rm");
    println!("  transactions list, borrow, return, rm");
    println!("  dashboard / notify");
    println!("  help / quit");
}

/// Split a command line into arguments, honoring double quotes so names
/// and titles can contain spaces.
fn split_args(line: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    for c in line.trim().chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    args.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        args.push(current);
    }
    args
}

#[cfg(test)]
mod tests {
    use super::split_args;

    #[test]
    fn split_args_honors_quotes() {
        assert_eq!(
            split_args(r#"authors add "Ursula K. Le Guin" "Essayist and novelist""#),
            vec![
                "authors",
                "add",
                "Ursula K. Le Guin",
                "Essayist and novelist"
            ]
        );
    }

    #[test]
    fn split_args_collapses_whitespace() {
        assert_eq!(split_args("  books   list  "), vec!["books", "list"]);
        assert!(split_args("").is_empty());
    }
}
