use uuid::Uuid;

/// Owner of a set of accounts at the data-store boundary.
pub type UserId = Uuid;

/// Label shown wherever an entity is named to the user.
pub trait Displayable {
    fn display_label(&self) -> String;
}
