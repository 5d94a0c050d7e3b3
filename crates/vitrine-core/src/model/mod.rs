pub mod attachment;
pub mod collection;
pub mod element;
pub mod ids;
pub mod item;
pub mod tag;

pub use attachment::{File, Location, Note};
pub use collection::Collection;
pub use element::{Element, ElementSet, ElementText};
pub use ids::{CollectionId, ElementId, ItemId, ItemTypeId, TagId};
pub use item::{Item, ItemType};
pub use tag::{Tag, Tagging, ITEM_TAGGING_KIND};
