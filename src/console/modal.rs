/// Create/edit/delete dialog state shared by the entity pages
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Modal<F> {
    #[default]
    Closed,
    Create(F),
    Edit { id: u64, form: F },
    /// First step of a two-step delete
    ConfirmDelete { id: u64, label: String },
}

impl<F> Modal<F> {
    pub fn open_create(&mut self, form: F) {
        *self = Self::Create(form);
    }

    pub fn open_edit(&mut self, id: u64, form: F) {
        *self = Self::Edit { id, form };
    }

    pub fn confirm_delete(&mut self, id: u64, label: impl Into<String>) {
        *self = Self::ConfirmDelete {
            id,
            label: label.into(),
        };
    }

    pub fn close(&mut self) {
        *self = Self::Closed;
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    pub fn form(&self) -> Option<&F> {
        match self {
            Self::Create(form) | Self::Edit { form, .. } => Some(form),
            _ => None,
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut F> {
        match self {
            Self::Create(form) | Self::Edit { form, .. } => Some(form),
            _ => None,
        }
    }

    /// Id of the record being deleted, if the delete dialog is up
    pub fn pending_delete(&self) -> Option<u64> {
        match self {
            Self::ConfirmDelete { id, .. } => Some(*id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transitions() {
        let mut modal: Modal<String> = Modal::default();
        assert!(!modal.is_open());

        modal.open_create("draft".into());
        modal.form_mut().unwrap().push('!');
        assert_eq!(modal.form().map(String::as_str), Some("draft!"));

        modal.confirm_delete(9, "Harbour Bakery");
        assert!(modal.form().is_none());
        assert_eq!(modal.pending_delete(), Some(9));

        modal.close();
        assert_eq!(modal, Modal::Closed);
    }
}
