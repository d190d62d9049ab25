//! Turn presentation descriptors into markup for the legacy web UI.

pub mod html {
    //! Font Awesome / Tailwind markup, byte-compatible with the templates the
    //! back-office UI already styles. Free text (phones, emails) is escaped.

    use crate::dto::Client;
    use crate::presentation::{AmountTone, ClientBadge, ColoredAmount, StatusBadge};

    pub fn badge(badge: ClientBadge) -> String {
        let (icon, color) = match badge {
            ClientBadge::Company => ("fa-building", "#3571A4"),
            ClientBadge::Individual => ("fa-user", "#3571A4"),
            ClientBadge::Conflict => ("fa-exclamation-triangle", "#D53935"),
            ClientBadge::Supplier => ("fa-truck", "#3571A4"),
        };
        format!(
            r#"<i class="fas {icon} text-[{color}] mr-2" title="{}"></i>"#,
            badge.title()
        )
    }

    /// All of a client's badges, concatenated in display order.
    pub fn client_icons(client: &Client) -> String {
        client.badges().into_iter().map(badge).collect()
    }

    pub fn status_icon(status: StatusBadge) -> String {
        let (icon, color) = match status {
            StatusBadge::Active => ("fa-circle-check", "#5CB85C"),
            StatusBadge::Inactive => ("fa-times", "#D53935"),
        };
        format!(
            r#"<i class="fas {icon} text-[{color}]" title="{}"></i>"#,
            status.title()
        )
    }

    pub fn phones_list(client: &Client) -> String {
        unordered_list(client.phone_numbers())
    }

    pub fn emails_list(client: &Client) -> String {
        unordered_list(client.email_addresses())
    }

    pub fn colored_amount(amount: &ColoredAmount) -> String {
        let class = match amount.tone {
            AmountTone::Positive => "text-green-600",
            AmountTone::Negative => "text-red-600",
        };
        format!(r#"<span class="{class}">{}</span>"#, escape(&amount.text))
    }

    fn unordered_list<'a>(entries: impl IntoIterator<Item = &'a str>) -> String {
        let mut out = String::from("<ul>");
        for entry in entries {
            out.push_str("<li>");
            out.push_str(&escape(entry));
            out.push_str("</li>");
        }
        out.push_str("</ul>");
        out
    }

    fn escape(text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            match c {
                '&' => out.push_str("&amp;"),
                '<' => out.push_str("&lt;"),
                '>' => out.push_str("&gt;"),
                '"' => out.push_str("&quot;"),
                '\'' => out.push_str("&#39;"),
                c => out.push(c),
            }
        }
        out
    }

}
