use uuid::Uuid;

/// Length of generated record ids, in hex characters.
pub const ID_LEN: usize = 6;

pub(crate) const MAX_ID_ATTEMPTS: usize = 64;

/// Produces candidate record ids. Uniqueness is checked by the store, not here.
pub trait IdSource {
    fn next_id(&mut self) -> String;
}

/// Random hex ids taken from a v4 UUID.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl IdSource for RandomIds {
    fn next_id(&mut self) -> String {
        let mut id = Uuid::new_v4().simple().to_string();
        id.truncate(ID_LEN);
        id
    }
}

/// Ids must survive a round trip through the tag line.
pub(crate) fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_')
}
