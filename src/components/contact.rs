//! Contact form with client-side validation and a simulated send.
//!
//! Nothing leaves the page: a valid submission walks the button through
//! "Sending..." and "Message Sent" on timers, then resets.

use std::sync::LazyLock;
use std::time::Duration;

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use log::info;
use regex::Regex;
use thiserror::Error;

/// How long the simulated send takes.
const SEND_DELAY: Duration = Duration::from_millis(1500);
/// How long "Message Sent" stays on the button.
const SENT_HOLD: Duration = Duration::from_millis(3000);
/// How long a validation message stays visible.
const MESSAGE_TTL: Duration = Duration::from_millis(5000);

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Why a submission was rejected. The display text is shown to the visitor.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ContactError {
	#[error("Please fill in all fields.")]
	MissingField,
	#[error("Please enter a valid email address.")]
	InvalidEmail,
}

/// A validated, trimmed submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContactMessage {
	pub name: String,
	pub email: String,
	pub message: String,
}

/// Loose shape check: something@something.tld, no whitespace.
pub fn is_valid_email(email: &str) -> bool {
	EMAIL.is_match(email)
}

/// Trim and check the three form fields.
pub fn validate(name: &str, email: &str, message: &str) -> Result<ContactMessage, ContactError> {
	let (name, email, message) = (name.trim(), email.trim(), message.trim());
	if name.is_empty() || email.is_empty() || message.is_empty() {
		return Err(ContactError::MissingField);
	}
	if !is_valid_email(email) {
		return Err(ContactError::InvalidEmail);
	}
	Ok(ContactMessage {
		name: name.to_string(),
		email: email.to_string(),
		message: message.to_string(),
	})
}

/// Submit button state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SendState {
	#[default]
	Idle,
	Sending,
	Sent,
}

impl SendState {
	pub fn label(self) -> &'static str {
		match self {
			SendState::Idle => "Send Message",
			SendState::Sending => "Sending...",
			SendState::Sent => "Message Sent",
		}
	}
}

/// The contact form.
#[component]
pub fn ContactForm() -> impl IntoView {
	let (name, set_name) = signal(String::new());
	let (email, set_email) = signal(String::new());
	let (message, set_message) = signal(String::new());
	let (state, set_state) = signal(SendState::Idle);
	let (error, set_error) = signal(None::<ContactError>);
	// Bumped for every shown error so an older timer cannot hide a newer one.
	let (error_seq, set_error_seq) = signal(0u32);

	let on_submit = move |ev: SubmitEvent| {
		ev.prevent_default();
		if state.get_untracked() != SendState::Idle {
			return;
		}

		match validate(&name.get_untracked(), &email.get_untracked(), &message.get_untracked()) {
			Err(err) => {
				set_error.set(Some(err));
				set_error_seq.update(|n| *n += 1);
				let seq = error_seq.get_untracked();
				set_timeout(
					move || {
						if error_seq.get_untracked() == seq {
							set_error.set(None);
						}
					},
					MESSAGE_TTL,
				);
			}
			Ok(submission) => {
				info!("bokeh-folio: simulated send from {}", submission.email);
				set_error.set(None);
				set_state.set(SendState::Sending);
				set_timeout(
					move || {
						set_state.set(SendState::Sent);
						set_name.set(String::new());
						set_email.set(String::new());
						set_message.set(String::new());
						set_timeout(move || set_state.set(SendState::Idle), SENT_HOLD);
					},
					SEND_DELAY,
				);
			}
		}
	};

	view! {
		<form id="contact-form" class="contact-form" novalidate=true on:submit=on_submit>
			<Show when=move || error.get().is_some()>
				<div class="form-message form-message--error" role="alert">
					{move || error.get().map(|e| e.to_string())}
				</div>
			</Show>
			<label for="name">"Name"</label>
			<input
				id="name"
				name="name"
				type="text"
				prop:value=move || name.get()
				on:input=move |ev| set_name.set(event_target_value(&ev))
			/>
			<label for="email">"Email"</label>
			<input
				id="email"
				name="email"
				type="email"
				prop:value=move || email.get()
				on:input=move |ev| set_email.set(event_target_value(&ev))
			/>
			<label for="message">"Message"</label>
			<textarea
				id="message"
				name="message"
				rows="5"
				prop:value=move || message.get()
				on:input=move |ev| set_message.set(event_target_value(&ev))
			></textarea>
			<button
				type="submit"
				class="btn"
				class:sent=move || state.get() == SendState::Sent
				disabled=move || state.get() != SendState::Idle
			>
				{move || state.get().label()}
			</button>
		</form>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn blank_fields_are_rejected() {
		assert_eq!(validate("", "a@b.co", "hi"), Err(ContactError::MissingField));
		assert_eq!(validate("Ann", "   ", "hi"), Err(ContactError::MissingField));
		assert_eq!(validate("Ann", "a@b.co", "\n\t"), Err(ContactError::MissingField));
	}

	#[test]
	fn malformed_email_is_rejected() {
		assert_eq!(validate("Ann", "ann.example.com", "hi"), Err(ContactError::InvalidEmail));
		assert_eq!(validate("Ann", "ann@example", "hi"), Err(ContactError::InvalidEmail));
		assert_eq!(validate("Ann", "a n@example.com", "hi"), Err(ContactError::InvalidEmail));
	}

	#[test]
	fn valid_submission_is_trimmed() {
		let msg = validate("  Ann ", " ann@example.com ", " Hello there ").unwrap();
		assert_eq!(msg.name, "Ann");
		assert_eq!(msg.email, "ann@example.com");
		assert_eq!(msg.message, "Hello there");
	}

	#[test]
	fn error_text_is_user_facing() {
		assert_eq!(ContactError::MissingField.to_string(), "Please fill in all fields.");
		assert_eq!(
			ContactError::InvalidEmail.to_string(),
			"Please enter a valid email address."
		);
	}

	#[test]
	fn button_labels_follow_state() {
		assert_eq!(SendState::default().label(), "Send Message");
		assert_eq!(SendState::Sending.label(), "Sending...");
		assert_eq!(SendState::Sent.label(), "Message Sent");
	}
}
