//! Short-name aliases for the most commonly requested tools. Chat models
//! frequently emit "contacts" when they mean the list call; resolving a few
//! well-known shorthands saves a correction round-trip. Unknown names pass
//! through untouched and fall out of validation as unknown tools.

/// Resolve a possibly-aliased tool name to its canonical registry name.
pub fn resolve(name: &str) -> &str {
    match name {
        "contacts" => "contacts_get-contacts",
        "contact" => "contacts_get-contact",
        "conversations" => "conversations_search-conversation",
        "opportunities" => "opportunities_search-opportunity",
        "pipelines" => "opportunities_get-pipelines",
        "transactions" => "payments_list-transactions",
        "appointments" => "calendars_get-calendar-events",
        "location" => "locations_get-location",
        _ => name,
    }
}
