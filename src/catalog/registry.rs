use super::ToolDefinition;

fn tool(
    name: &str,
    description: &str,
    required: &[&str],
    optional: &[&str],
) -> ToolDefinition {
    ToolDefinition {
        name: name.to_string(),
        description: description.to_string(),
        required_params: required.iter().map(|p| p.to_string()).collect(),
        optional_params: optional.iter().map(|p| p.to_string()).collect(),
    }
}

/// The builtin tool table. Order matters: catalog listings reproduce it as-is.
pub(super) fn definitions() -> Vec<ToolDefinition> {
    vec![
        // Contacts
        tool(
            "contacts_get-contacts",
            "Fetch all contacts",
            &[],
            &["limit", "skip", "query"],
        ),
        tool(
            "contacts_get-contact",
            "Fetch contact details",
            &["contactId"],
            &[],
        ),
        tool(
            "contacts_create-contact",
            "Create a new contact",
            &[],
            &["firstName", "lastName", "email", "phone", "tags", "customFields"],
        ),
        tool(
            "contacts_update-contact",
            "Update an existing contact",
            &["contactId"],
            &["firstName", "lastName", "email", "phone", "tags", "customFields"],
        ),
        tool(
            "contacts_upsert-contact",
            "Create or update a contact matched by email or phone",
            &[],
            &["email", "phone", "firstName", "lastName", "tags", "customFields"],
        ),
        tool(
            "contacts_add-tags",
            "Add tags to a contact",
            &["contactId", "tags"],
            &[],
        ),
        tool(
            "contacts_remove-tags",
            "Remove tags from a contact",
            &["contactId", "tags"],
            &[],
        ),
        tool(
            "contacts_get-all-tasks",
            "Fetch all tasks for a contact",
            &["contactId"],
            &[],
        ),
        // Conversations
        tool(
            "conversations_search-conversation",
            "Find conversations",
            &[],
            &["contactId", "query", "limit"],
        ),
        tool(
            "conversations_get-messages",
            "Fetch messages in a conversation",
            &["conversationId"],
            &["limit"],
        ),
        tool(
            "conversations_send-a-new-message",
            "Send a message into a conversation",
            &["conversationId", "message"],
            &["type"],
        ),
        // Opportunities
        tool(
            "opportunities_search-opportunity",
            "Find deals",
            &[],
            &["query", "status", "limit"],
        ),
        tool(
            "opportunities_get-opportunity",
            "Fetch opportunity details",
            &["opportunityId"],
            &[],
        ),
        tool(
            "opportunities_update-opportunity",
            "Update an existing opportunity",
            &["opportunityId"],
            &["name", "status", "monetaryValue"],
        ),
        tool(
            "opportunities_get-pipelines",
            "Fetch all pipelines",
            &[],
            &[],
        ),
        // Payments
        tool(
            "payments_list-transactions",
            "List payment transactions",
            &[],
            &["limit", "contactId"],
        ),
        tool(
            "payments_get-order-by-id",
            "Fetch order details",
            &["orderId"],
            &[],
        ),
        // Calendars
        tool(
            "calendars_get-calendar-events",
            "Get appointments within a time range",
            &["startTime", "endTime"],
            &["calendarId", "userId"],
        ),
        tool(
            "calendars_get-appointment-notes",
            "Fetch notes for an appointment",
            &["appointmentId"],
            &["limit"],
        ),
        // Locations
        tool(
            "locations_get-location",
            "Get location details by ID",
            &[],
            &[],
        ),
        tool(
            "locations_get-custom-fields",
            "Fetch custom field definitions for the location",
            &[],
            &["model"],
        ),
    ]
}
