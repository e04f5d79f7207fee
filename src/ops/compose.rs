use crate::io::storage::{RecipeStorage, StorageError};
use crate::model::recipe::RecipeId;
use crate::ops::store::RecipeStore;

/// The three composer inputs, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposerField {
    Title,
    Description,
    Image,
}

impl ComposerField {
    pub const ALL: [ComposerField; 3] = [
        ComposerField::Title,
        ComposerField::Description,
        ComposerField::Image,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ComposerField::Title => "Recipe Title",
            ComposerField::Description => "Description",
            ComposerField::Image => "Image URL",
        }
    }
}

/// Form state for entering a recipe by hand
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Composer {
    pub title: String,
    pub description: String,
    pub image: String,
}

impl Composer {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Composer {
            title: title.into(),
            description: description.into(),
            image: image.into(),
        }
    }

    pub fn field(&self, field: ComposerField) -> &str {
        match field {
            ComposerField::Title => &self.title,
            ComposerField::Description => &self.description,
            ComposerField::Image => &self.image,
        }
    }

    pub fn field_mut(&mut self, field: ComposerField) -> &mut String {
        match field {
            ComposerField::Title => &mut self.title,
            ComposerField::Description => &mut self.description,
            ComposerField::Image => &mut self.image,
        }
    }

    /// Fields that still need a value
    pub fn missing(&self) -> Vec<ComposerField> {
        ComposerField::ALL
            .into_iter()
            .filter(|f| self.field(*f).is_empty())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }

    pub fn clear(&mut self) {
        *self = Composer::default();
    }

    /// Add the recipe if every field is filled, then clear the form.
    /// An incomplete form is left untouched and `Ok(None)` is returned.
    pub fn submit<S: RecipeStorage>(
        &mut self,
        store: &mut RecipeStore<S>,
    ) -> Result<Option<RecipeId>, StorageError> {
        if !self.is_complete() {
            return Ok(None);
        }
        let Composer {
            title,
            description,
            image,
        } = std::mem::take(self);
        store.add_recipe(title, description, image).map(Some)
    }
}
