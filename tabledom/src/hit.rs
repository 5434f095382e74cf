use crate::element::{Content, Element};

/// Ids on the path from `target` up to the root, deepest first.
pub fn hit_path(root: &Element, target: &str) -> Option<Vec<String>> {
    let mut path = Vec::new();
    if hit_path_element(root, target, &mut path) {
        Some(path)
    } else {
        None
    }
}

fn hit_path_element(element: &Element, target: &str, path: &mut Vec<String>) -> bool {
    if element.id == target {
        path.push(element.id.clone());
        return true;
    }

    if let Content::Children(children) = &element.content {
        for child in children {
            if hit_path_element(child, target, path) {
                path.push(element.id.clone());
                return true;
            }
        }
    }

    false
}
