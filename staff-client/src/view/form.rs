//! Employee registration form

use crate::api::Attachment;
use crate::store::{Command, EntityState};
use crate::ClientResult;
use shared::{Employee, EmployeeInput};
use std::path::Path;

/// Mobile prefix whose middle block has four digits
pub const MOBILE_PREFIX: &str = "010";
pub const DEFAULT_EMAIL_DOMAIN: &str = "naver.com";

const SHORT_MIDDLE_DIGITS: usize = 3;
const FULL_BLOCK_DIGITS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhonePart {
    Middle,
    Last,
}

/// Local draft of a new (or edited) employee, plus the file picked for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeDraft {
    pub input: EmployeeInput,
    attachment: Option<Attachment>,
}

impl Default for EmployeeDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl EmployeeDraft {
    pub fn new() -> Self {
        Self {
            input: EmployeeInput {
                email_domain: Some(DEFAULT_EMAIL_DOMAIN.to_string()),
                phone_prefix: Some(MOBILE_PREFIX.to_string()),
                ..Default::default()
            },
            attachment: None,
        }
    }

    /// Prefill from an existing record for editing
    pub fn edit(employee: &Employee) -> Self {
        Self {
            input: EmployeeInput::from(employee),
            attachment: None,
        }
    }

    /// Changing the prefix invalidates both number blocks.
    pub fn set_phone_prefix(&mut self, prefix: impl Into<String>) {
        self.input.phone_prefix = Some(prefix.into());
        self.input.phone_middle = Some(String::new());
        self.input.phone_last = Some(String::new());
    }

    /// Keep digits only, truncated to the block's length.
    pub fn set_phone_part(&mut self, part: PhonePart, raw: &str) {
        let max = match part {
            PhonePart::Middle if self.input.phone_prefix.as_deref() != Some(MOBILE_PREFIX) => {
                SHORT_MIDDLE_DIGITS
            }
            _ => FULL_BLOCK_DIGITS,
        };
        let digits: String = raw.chars().filter(char::is_ascii_digit).take(max).collect();

        match part {
            PhonePart::Middle => self.input.phone_middle = Some(digits),
            PhonePart::Last => self.input.phone_last = Some(digits),
        }
    }

    /// Copy a finished upload's URL into the draft. Returns whether anything changed.
    pub fn merge_uploaded_image(&mut self, state: &EntityState<Employee>) -> bool {
        match state.image_upload_url() {
            Some(url) if self.input.profile_image_url.as_deref() != Some(url) => {
                self.input.profile_image_url = Some(url.to_string());
                true
            }
            _ => false,
        }
    }

    /// Pick a file; any previously picked file is released.
    pub fn attach(&mut self, attachment: Attachment) {
        self.attachment = Some(attachment);
    }

    pub async fn attach_file(&mut self, path: impl AsRef<Path>) -> ClientResult<()> {
        let attachment = Attachment::from_path(path).await?;
        self.attach(attachment);
        Ok(())
    }

    pub fn clear_attachment(&mut self) {
        self.attachment = None;
    }

    pub fn attachment(&self) -> Option<&Attachment> {
        self.attachment.as_ref()
    }

    /// Whether the picked file can be previewed as an image
    pub fn has_image_attachment(&self) -> bool {
        self.attachment.as_ref().is_some_and(Attachment::is_image)
    }

    /// Multipart create: the draft as the `employee` part, the picked file as `file`
    pub fn into_create_command(self) -> Command<Employee> {
        Command::Create {
            input: self.input,
            attachment: self.attachment,
        }
    }

    /// Save an edited record; the attachment is not part of an update
    pub fn into_update_command(self, id: i64) -> Command<Employee> {
        Command::Update {
            id,
            input: self.input,
        }
    }
}
