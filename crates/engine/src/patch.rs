//! Sparse updates.
//!
//! A [`Patch`] collects only the fields a caller actually supplied. Each
//! entity exposes an enum of its updatable fields; the enum knows how to
//! validate itself and how to write itself onto the entity's active model, so
//! absent fields are never touched.

use crate::{EngineError, ResultEngine};

/// One updatable field of an entity, carrying its new value.
pub trait PatchField<A> {
    /// camelCase name of the field on the wire.
    fn name(&self) -> &'static str;

    /// Checks the new value before anything is written.
    fn validate(&self) -> ResultEngine<()> {
        Ok(())
    }

    /// Writes the value onto the active model.
    fn apply(self, model: &mut A);
}

/// Ordered set of field updates for a single row.
#[derive(Clone, Debug, PartialEq)]
pub struct Patch<F> {
    fields: Vec<F>,
}

impl<F> Default for Patch<F> {
    fn default() -> Self {
        Self { fields: Vec::new() }
    }
}

impl<F> Patch<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, field: F) -> Self {
        self.fields.push(field);
        self
    }

    /// Adds the field only when a value was supplied.
    pub fn maybe(self, field: Option<F>) -> Self {
        match field {
            Some(field) => self.set(field),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &F> {
        self.fields.iter()
    }

    /// Rejects empty patches and invalid values.
    pub(crate) fn validate<A>(&self) -> ResultEngine<()>
    where
        F: PatchField<A>,
    {
        if self.is_empty() {
            return Err(EngineError::InvalidInput(
                "no updatable fields supplied".to_string(),
            ));
        }
        self.fields.iter().try_for_each(|field| field.validate())
    }

    /// Validates, then writes every field onto `model` in insertion order.
    pub(crate) fn apply_to<A>(self, model: &mut A) -> ResultEngine<()>
    where
        F: PatchField<A>,
    {
        self.validate::<A>()?;
        for field in self.fields {
            field.apply(model);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq)]
    struct Draft {
        title: Option<String>,
        amount: Option<i64>,
    }

    #[derive(Clone, Debug, PartialEq)]
    enum DraftField {
        Title(String),
        Amount(i64),
    }

    impl PatchField<Draft> for DraftField {
        fn name(&self) -> &'static str {
            match self {
                Self::Title(_) => "title",
                Self::Amount(_) => "amount",
            }
        }

        fn validate(&self) -> ResultEngine<()> {
            match self {
                Self::Amount(amount) if *amount <= 0 => {
                    Err(EngineError::InvalidAmount("amount must be > 0".to_string()))
                }
                _ => Ok(()),
            }
        }

        fn apply(self, model: &mut Draft) {
            match self {
                Self::Title(title) => model.title = Some(title),
                Self::Amount(amount) => model.amount = Some(amount),
            }
        }
    }

    #[test]
    fn empty_patch_is_rejected() {
        let mut draft = Draft::default();
        let err = Patch::<DraftField>::new()
            .maybe(None)
            .apply_to(&mut draft)
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
    }

    #[test]
    fn only_supplied_fields_are_written() {
        let mut draft = Draft::default();
        let patch = Patch::new()
            .maybe(None)
            .maybe(Some(DraftField::Title("rent".to_string())));
        assert_eq!(patch.len(), 1);
        assert_eq!(
            patch.fields().map(|field| field.name()).collect::<Vec<_>>(),
            vec!["title"]
        );

        patch.apply_to(&mut draft).unwrap();
        assert_eq!(
            draft,
            Draft {
                title: Some("rent".to_string()),
                amount: None
            }
        );
    }

    #[test]
    fn invalid_field_leaves_model_untouched() {
        let mut draft = Draft::default();
        let patch = Patch::new()
            .set(DraftField::Title("rent".to_string()))
            .set(DraftField::Amount(0));
        assert!(patch.apply_to(&mut draft).is_err());
        assert_eq!(draft, Draft::default());
    }
}
