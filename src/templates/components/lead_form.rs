use maud::{html, Markup};

/// Inquiry form posted to /leads. `source_page` tags where the lead came
/// from; `listing_id` is set on property detail contexts.
pub fn lead_form(source_page: &str, listing_id: Option<&str>) -> Markup {
    html! {
        form action="/leads" method="post" class="lead-form" {
            input type="hidden" name="source_page" value=(source_page);
            @if let Some(id) = listing_id {
                input type="hidden" name="listing_id" value=(id);
            }

            label for="lead-name" { "Name" }
            input id="lead-name" type="text" name="name" required placeholder="Your name";

            label for="lead-email" { "Email" }
            input id="lead-email" type="email" name="email" required placeholder="you@example.com";

            label for="lead-phone" { "Phone (optional)" }
            input id="lead-phone" type="tel" name="phone";

            label for="lead-message" { "Message" }
            textarea id="lead-message" name="message" rows="3"
                placeholder="Tell us what you're looking for" {}

            button type="submit" { "Request info" }
        }
    }
}
