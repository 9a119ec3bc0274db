pub mod auth;
pub mod catalog;

use bookrack_kernel::ModuleRegistry;

/// Register all application modules with the registry
pub fn register_all(registry: &mut ModuleRegistry) {
    registry.register(auth::create_module());
    registry.register(catalog::create_module());
}
