//! JSON-LD document assembly.
//!
//! Properties emit in the composed table's declaration order regardless of
//! the order the adapter set them, so the same graph always renders the
//! same document. Present properties the table does not declare are skipped
//! (the validator reports them; the document stays well-formed).

use std::cell::RefCell;

use serde_json::{Map, Value as Json};

use sdm_core::{EntityInstance, InstanceHandle, Value};
use sdm_vocab::{RegistryError, VocabularyRegistry};

const CONTEXT_IRI: &str = "https://schema.org";

/// Render an instance graph as a JSON-LD document.
///
/// # Errors
///
/// Returns `Err` when the root or any reachable nested instance names a
/// type the registry does not know.
pub fn to_json_ld(
    registry: &VocabularyRegistry,
    root: &InstanceHandle,
) -> Result<Json, RegistryError> {
    let mut renderer = Renderer {
        registry,
        path: Vec::new(),
    };
    renderer.render_node(root, true)
}

struct Renderer<'r> {
    registry: &'r VocabularyRegistry,
    /// Handle identities of the nodes currently being rendered, root first.
    path: Vec<*const RefCell<EntityInstance>>,
}

impl Renderer<'_> {
    fn render_node(&mut self, handle: &InstanceHandle, root: bool) -> Result<Json, RegistryError> {
        let ptr = std::rc::Rc::as_ptr(handle);
        if self.path.contains(&ptr) {
            return Ok(stub(&handle.borrow()));
        }

        let instance = handle.borrow();
        let table = self.registry.composed_properties(instance.type_name().as_str())?;

        let mut node = Map::new();
        if root {
            node.insert("@context".to_string(), Json::String(CONTEXT_IRI.to_string()));
        }
        node.insert(
            "@type".to_string(),
            Json::String(instance.type_name().as_str().to_string()),
        );

        self.path.push(ptr);
        for contract in table.iter() {
            let name = contract.name();
            let Some(value) = instance.get(name.as_str()) else {
                continue;
            };
            if value.is_empty() {
                continue;
            }
            node.insert(name.as_str().to_string(), self.render_value(value)?);
        }
        self.path.pop();

        for (name, _) in instance.properties() {
            if !table.contains(name.as_str()) {
                tracing::debug!(
                    r#type = %instance.type_name(),
                    property = %name,
                    "skipping undeclared property"
                );
            }
        }

        Ok(Json::Object(node))
    }

    fn render_value(&mut self, value: &Value) -> Result<Json, RegistryError> {
        match value {
            Value::Scalar(scalar) => Ok(scalar.to_json()),
            Value::Entity(handle) => self.render_node(handle, false),
            Value::List(items) => {
                let mut rendered = Vec::with_capacity(items.len());
                for item in items {
                    rendered.push(self.render_value(item)?);
                }
                Ok(Json::Array(rendered))
            }
        }
    }
}

/// A reference stub for a node on the active recursion path: its type, and
/// its URL as `@id` when one is set.
fn stub(instance: &EntityInstance) -> Json {
    let mut node = Map::new();
    node.insert(
        "@type".to_string(),
        Json::String(instance.type_name().as_str().to_string()),
    );
    if let Some(Value::Scalar(scalar)) = instance.get("url") {
        if !scalar.is_empty() {
            node.insert("@id".to_string(), scalar.to_json());
        }
    }
    Json::Object(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    use sdm_core::{ModuleId, PropertyName, TypeName};
    use sdm_vocab::{
        CapabilityModule, EntityTypeDefinition, PropertyContract, RegistryBuilder,
        TypeAlternative,
    };

    fn type_name(s: &str) -> TypeName {
        TypeName::new(s).unwrap()
    }

    fn prop(s: &str) -> PropertyName {
        PropertyName::new(s).unwrap()
    }

    fn contract(name: &str, notations: &[&str]) -> PropertyContract {
        PropertyContract::new(
            prop(name),
            notations
                .iter()
                .map(|n| TypeAlternative::parse(n).unwrap())
                .collect(),
            "",
        )
        .unwrap()
    }

    fn registry() -> VocabularyRegistry {
        let mut builder = RegistryBuilder::new();
        builder
            .register_module(CapabilityModule::new(
                ModuleId::new("thing").unwrap(),
                vec![
                    contract("name", &["Text", "Text[]"]),
                    contract("description", &["Text", "Text[]"]),
                    contract("url", &["URL", "URL[]"]),
                ],
            ))
            .unwrap();
        builder
            .register_module(CapabilityModule::new(
                ModuleId::new("place").unwrap(),
                vec![
                    contract("containedInPlace", &["Place", "Place[]"]),
                    contract("containsPlace", &["Place", "Place[]"]),
                    contract("latitude", &["Number", "Number[]", "Text", "Text[]"]),
                ],
            ))
            .unwrap();
        builder
            .register_type(EntityTypeDefinition::new(
                type_name("Thing"),
                None,
                "https://schema.org/Thing",
                "",
                vec![ModuleId::new("thing").unwrap()],
            ))
            .unwrap();
        builder
            .register_type(EntityTypeDefinition::new(
                type_name("Place"),
                Some(type_name("Thing")),
                "https://schema.org/Place",
                "",
                vec![ModuleId::new("place").unwrap(), ModuleId::new("thing").unwrap()],
            ))
            .unwrap();
        builder.build().unwrap()
    }

    fn keys(json: &Json) -> Vec<&str> {
        json.as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect()
    }

    #[test]
    fn test_context_at_root_only() {
        let registry = registry();
        let inner = EntityInstance::new(type_name("Place")).into_handle();
        let mut outer = EntityInstance::new(type_name("Place"));
        outer.set(prop("containsPlace"), Value::entity(inner));

        let doc = to_json_ld(&registry, &outer.into_handle()).unwrap();
        assert_eq!(doc["@context"], "https://schema.org");
        assert_eq!(doc["@type"], "Place");
        assert!(doc["containsPlace"].get("@context").is_none());
        assert_eq!(doc["containsPlace"]["@type"], "Place");
    }

    #[test]
    fn test_declaration_order_beats_insertion_order() {
        let registry = registry();
        let mut place = EntityInstance::new(type_name("Place"));
        // Set in reverse of the composed declaration order.
        place.set(prop("name"), Value::text("Pitch 12"));
        place.set(prop("latitude"), Value::number(47.3));
        place.set(prop("url"), Value::url("https://example.com/p/12"));

        let doc = to_json_ld(&registry, &place.into_handle()).unwrap();
        assert_eq!(
            keys(&doc),
            vec!["@context", "@type", "latitude", "name", "url"]
        );
    }

    #[test]
    fn test_empty_and_undeclared_values_skipped() {
        let registry = registry();
        let mut place = EntityInstance::new(type_name("Place"));
        place.set(prop("name"), Value::text("Pitch 12"));
        place.set(prop("description"), Value::text("   "));
        place.set(prop("bogus"), Value::text("dropped"));

        let doc = to_json_ld(&registry, &place.into_handle()).unwrap();
        assert_eq!(keys(&doc), vec!["@context", "@type", "name"]);
    }

    #[test]
    fn test_scalar_rendering() {
        let registry = registry();
        let mut place = EntityInstance::new(type_name("Place"));
        place.set(prop("latitude"), Value::number(47.25));
        place.set(
            prop("name"),
            Value::list(vec![Value::text("Pitch 12"), Value::text("Riverside 12")]),
        );

        let doc = to_json_ld(&registry, &place.into_handle()).unwrap();
        assert_eq!(doc["latitude"], 47.25);
        assert_eq!(doc["name"], serde_json::json!(["Pitch 12", "Riverside 12"]));
    }

    #[test]
    fn test_cycle_renders_as_stub_with_id() {
        let registry = registry();
        let campground = EntityInstance::new(type_name("Place")).into_handle();
        let pitch = EntityInstance::new(type_name("Place")).into_handle();
        campground.borrow_mut().set(prop("name"), Value::text("Camp Aurora"));
        campground
            .borrow_mut()
            .set(prop("url"), Value::url("https://example.com/camp"));
        campground
            .borrow_mut()
            .set(prop("containsPlace"), Value::entity(Rc::clone(&pitch)));
        pitch
            .borrow_mut()
            .set(prop("containedInPlace"), Value::entity(Rc::clone(&campground)));

        let doc = to_json_ld(&registry, &campground).unwrap();
        let stub = &doc["containsPlace"]["containedInPlace"];
        assert_eq!(
            stub,
            &serde_json::json!({ "@type": "Place", "@id": "https://example.com/camp" })
        );
    }

    #[test]
    fn test_stub_without_url_has_no_id() {
        let registry = registry();
        let node = EntityInstance::new(type_name("Place")).into_handle();
        node.borrow_mut()
            .set(prop("containsPlace"), Value::entity(Rc::clone(&node)));

        let doc = to_json_ld(&registry, &node).unwrap();
        assert_eq!(doc["containsPlace"], serde_json::json!({ "@type": "Place" }));
    }

    #[test]
    fn test_shared_node_without_cycle_renders_fully_twice() {
        let registry = registry();
        let shared = EntityInstance::new(type_name("Place")).into_handle();
        shared.borrow_mut().set(prop("name"), Value::text("Shared"));
        let mut outer = EntityInstance::new(type_name("Place"));
        outer.set(
            prop("containsPlace"),
            Value::list(vec![
                Value::entity(Rc::clone(&shared)),
                Value::entity(Rc::clone(&shared)),
            ]),
        );

        let doc = to_json_ld(&registry, &outer.into_handle()).unwrap();
        let rendered = doc["containsPlace"].as_array().unwrap();
        assert_eq!(rendered.len(), 2);
        assert_eq!(rendered[0]["name"], "Shared");
        assert_eq!(rendered[1]["name"], "Shared");
    }

    #[test]
    fn test_unknown_nested_type_aborts() {
        let registry = registry();
        let stranger = EntityInstance::new(type_name("Stranger")).into_handle();
        let mut outer = EntityInstance::new(type_name("Place"));
        outer.set(prop("containsPlace"), Value::entity(stranger));

        let err = to_json_ld(&registry, &outer.into_handle()).unwrap_err();
        assert!(matches!(err, RegistryError::UnknownType { .. }));
    }
}
