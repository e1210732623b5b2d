use soroban_sdk::{String, Vec};

use crate::errors::Error;

const MAX_TITLE_LEN: u32 = 120;
const MAX_COMMIT_MESSAGE_LEN: u32 = 280;
const MAX_FILE_REF_LEN: u32 = 200;

pub fn validate_title(title: &String) -> Result<(), Error> {
    if title.is_empty() {
        return Err(Error::EmptyTitle);
    }
    if title.len() > MAX_TITLE_LEN {
        return Err(Error::TitleTooLong);
    }
    Ok(())
}

pub fn validate_commit_message(message: &String) -> Result<(), Error> {
    if message.is_empty() {
        return Err(Error::EmptyCommitMessage);
    }
    if message.len() > MAX_COMMIT_MESSAGE_LEN {
        return Err(Error::CommitMessageTooLong);
    }
    Ok(())
}

/// The blob locator is opaque but bounded; the store hands out refs well
/// under this ceiling.
pub fn validate_file_ref(file_ref: &String) -> Result<(), Error> {
    if file_ref.is_empty() {
        return Err(Error::EmptyFileRef);
    }
    if file_ref.len() > MAX_FILE_REF_LEN {
        return Err(Error::FileRefTooLong);
    }
    Ok(())
}

pub fn validate_file_name(file_name: &String) -> Result<(), Error> {
    if file_name.is_empty() {
        return Err(Error::EmptyFileName);
    }
    Ok(())
}

pub fn validate_tags(tags: &Vec<String>) -> Result<(), Error> {
    for tag in tags.iter() {
        if tag.is_empty() {
            return Err(Error::EmptyTag);
        }
    }
    Ok(())
}

/// Size policy gate. Runs before any state is written so an oversized
/// upload has no partial effect.
pub fn validate_file_size(file_size: u64, max_file_size: u64) -> Result<(), Error> {
    if file_size == 0 {
        return Err(Error::EmptyFile);
    }
    if file_size > max_file_size {
        return Err(Error::FileTooLarge);
    }
    Ok(())
}
