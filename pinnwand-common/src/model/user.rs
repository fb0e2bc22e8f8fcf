use crate::model::Id;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct UserMarker;

/// Denormalized copy of a user's public profile, embedded in posts, comments
/// and likes at write time. Not a live reference: later profile edits do not
/// propagate into existing posts.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostOwner {
    pub id: Id<UserMarker>,
    pub name: String,
    pub surname: String,
    pub avatar: String,
}
