//! Well-known SaaS brand names used for rank computation.

/// Brands an assistant is likely to surface alongside the target. These
/// count toward the target's first-mention rank even when the caller did
/// not list them as competitors.
pub(crate) const KNOWN_BRANDS: &[&str] = &[
    "HubSpot",
    "Salesforce",
    "Mailchimp",
    "Shopify",
    "WordPress",
    "Notion",
    "Monday",
    "Asana",
    "Slack",
    "Zoom",
    "Figma",
    "Canva",
    "Semrush",
    "Ahrefs",
    "Moz",
    "Hotjar",
    "Mixpanel",
    "Amplitude",
    "Intercom",
    "Zendesk",
    "Freshdesk",
    "Jira",
    "Confluence",
    "Trello",
    "ClickUp",
    "Linear",
    "Webflow",
    "Squarespace",
    "Wix",
    "BigCommerce",
    "Magento",
    "Stripe",
    "PayPal",
    "Braintree",
    "Twilio",
    "SendGrid",
    "Klaviyo",
    "ActiveCampaign",
    "Marketo",
    "Pardot",
    "Eloqua",
];
