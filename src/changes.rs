use serde::{Deserialize, Serialize};

/// Write intent for a single node of a submitted entity graph.
///
/// This is the instruction the reconciliation layer acts on; it travels next
/// to each entity on the wire instead of living as hidden state on the
/// domain model. `Noop` nodes are never written, but they still resolve
/// references for sibling writes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeOp {
    #[default]
    Noop,
    Insert,
    Update,
    Delete,
}

impl ChangeOp {
    pub fn is_noop(self) -> bool {
        matches!(self, ChangeOp::Noop)
    }
}

/// An entity paired with the change operation to apply to it.
///
/// On the wire the entity's own fields are flattened beside a `ChangeOp`
/// field, so a payload without one parses as an untouched node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tracked<T> {
    #[serde(default, rename = "ChangeOp")]
    pub change_op: ChangeOp,
    #[serde(flatten)]
    pub data: T,
}

impl<T> Tracked<T> {
    pub fn new(change_op: ChangeOp, data: T) -> Self {
        Self { change_op, data }
    }

    /// Wraps reloaded data as an untouched node, the state every node
    /// reports after a successful save.
    pub fn noop(data: T) -> Self {
        Self::new(ChangeOp::Noop, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    struct Line {
        product_id: i32,
        quantity: i32,
    }

    #[test]
    fn change_op_defaults_to_noop() {
        let node: Tracked<Line> =
            serde_json::from_value(json!({ "ProductId": 1, "Quantity": 3 })).unwrap();
        assert_eq!(node.change_op, ChangeOp::Noop);
        assert_eq!(node.data.product_id, 1);
    }

    #[test]
    fn change_op_parses_beside_entity_fields() {
        let node: Tracked<Line> = serde_json::from_value(json!({
            "ChangeOp": "Delete",
            "ProductId": 2,
            "Quantity": 0
        }))
        .unwrap();
        assert_eq!(node.change_op, ChangeOp::Delete);
    }

    #[test]
    fn serialized_node_reports_its_op() {
        let value = serde_json::to_value(Tracked::noop(Line {
            product_id: 7,
            quantity: 2,
        }))
        .unwrap();
        assert_eq!(value["ChangeOp"], "Noop");
        assert_eq!(value["ProductId"], 7);
    }
}
