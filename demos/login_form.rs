//! Login Form
//!
//! This example drives a small sign-up form through the same handlers a
//! rendering layer would call.
//!
//! Key concepts:
//! - `use_form` returns a handle plus the two update handlers
//! - Validity is judged by the caller and aggregated by the store
//! - Observers are pushed every new snapshot
//! - Undo and checkpoints come from the recorded history
//!
//! Run with: RUST_LOG=formstate=debug cargo run --example login_form

use formstate::checkpoint::FormCheckpoint;
use formstate::core::FormInputs;
use formstate::form_inputs;
use formstate::store::{use_form, FormHandle, FormStore, DEFAULT_HISTORY_LIMIT};
use formstate::FormSnapshot;
use stillwater::validation::Validation;
use tracing_subscriber::EnvFilter;

fn email_is_valid(value: &str) -> bool {
    value.contains('@') && value.contains('.')
}

fn password_is_valid(value: &str) -> bool {
    value.len() >= 8
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Login Form Example ===\n");

    let inputs: FormInputs<String> = form_inputs! {
        "email" => (None::<String>, false),
        "password" => (None::<String>, false),
    };
    let (form, on_input, set_form_data) = use_form(inputs, false);

    form.subscribe(|snapshot: &FormSnapshot<String>| {
        println!(
            "  [render] submit button {}",
            if snapshot.is_valid() { "enabled" } else { "disabled" }
        );
    });

    println!("Typing into the form:");
    for (field, value) in [
        ("email", "ada"),
        ("email", "ada@example.com"),
        ("password", "short"),
        ("password", "correct horse"),
    ] {
        let is_valid = match field {
            "email" => email_is_valid(value),
            _ => password_is_valid(value),
        };
        println!("  {field} = {value:?} (valid: {is_valid})");
        on_input.handle(field, value.to_string(), is_valid);
    }

    println!("\nUndo the last edit:");
    form.undo();
    match form.snapshot().validate() {
        Validation::Success(_) => println!("  every field is valid"),
        Validation::Failure(errors) => {
            for error in errors.iter() {
                println!("  {error}");
            }
        }
    }

    println!("\nLoading saved account data:");
    let saved: FormInputs<String> = form_inputs! {
        "email" => ("grace@example.com".to_string(), true),
        "password" => ("hunter2hunter2".to_string(), true),
    };
    set_form_data.handle(saved, true);

    println!("\nCheckpoint and resume:");
    on_input.handle("email", "grace@example.org".to_string(), true);
    let json = form.checkpoint().to_json()?;
    println!("  saved {} transitions", form.history().len());

    let resumed = FormHandle::new(FormStore::resume(
        FormCheckpoint::<String>::from_json(&json)?,
        DEFAULT_HISTORY_LIMIT,
    )?);
    resumed.undo();
    println!(
        "  resumed and undid one edit, email: {:?}",
        resumed.snapshot().value("email")
    );

    println!("\n=== Example Complete ===");
    Ok(())
}
