use crate::keywords::TargetModules;

/// Cheap substring check run before parsing.
///
/// Any file importing a target module must spell its name somewhere, so a
/// `false` here is final. A `true` only means the file is worth parsing.
pub fn may_reference(text: &str, targets: &TargetModules) -> bool {
    targets.names().iter().any(|name| text.contains(name.as_str()))
}
