use serde::Deserialize;

use crate::board::Board;
use crate::error::Result;

/// Element-type tag recorded on every group built through [`create_group`].
pub const GROUP_EL_TYPE: &str = "group";

/// Recognized attributes of a group element. Anything else is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GroupAttributes {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Group `parents` on `board`, the way element factories create groups.
///
/// Returns the id of the new group. Its `parents` keeps the seed ids as
/// given, including ones that were skipped.
pub fn create_group<S: AsRef<str>>(
    board: &mut Board,
    parents: &[S],
    attributes: &GroupAttributes,
) -> Result<String> {
    let id = board.create_group(
        attributes.id.as_deref(),
        attributes.name.as_deref(),
        parents,
    )?;
    if let Some(group) = board.group_mut(&id) {
        group.el_type = GROUP_EL_TYPE;
        group.parents = parents.iter().map(|p| p.as_ref().to_string()).collect();
    }
    Ok(id)
}

/// Group points listed one by one.
///
/// ```ignore
/// group!(board, "A", "B", "C")?;
/// group!(board, id = "g", name = "triangle"; "A", "B", "C")?;
/// ```
#[macro_export]
macro_rules! group {
    ($board:expr, id = $id:expr, name = $name:expr; $($seed:expr),+ $(,)?) => {
        $board.create_group(Some($id), Some($name), [$($seed),+])
    };
    ($board:expr, $($seed:expr),+ $(,)?) => {
        $board.create_group(None, None, [$($seed),+])
    };
}
