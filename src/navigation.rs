//! The navigation bar shown at the top of every page, and at the bottom on small screens.

use maud::{Markup, html};

use crate::endpoints;

const BRAND_STYLE: &str = "text-2xl font-semibold whitespace-nowrap dark:text-white";

const DESKTOP_LINK_STYLE: &str = "block py-2 text-gray-900 hover:text-blue-700 dark:text-white";

const DESKTOP_CURRENT_LINK_STYLE: &str = "block py-2 font-semibold text-blue-700 dark:text-blue-500";

const MOBILE_LINK_STYLE: &str = "flex items-center justify-center rounded-lg px-2 py-2 \
    text-xs font-semibold text-gray-600 hover:text-blue-700 dark:text-gray-300";

const MOBILE_CURRENT_LINK_STYLE: &str = "flex items-center justify-center rounded-lg px-2 py-2 \
    text-xs font-semibold bg-blue-50 text-blue-700 dark:bg-blue-900/30 dark:text-blue-200";

/// Where a navigation link is rendered.
#[derive(Clone, Copy)]
enum Layout {
    /// The top bar on large screens.
    Desktop,
    /// The tab bar pinned to the bottom of small screens.
    Mobile,
}

#[derive(Clone)]
struct Link<'a> {
    url: &'a str,
    title: &'a str,
    is_current: bool,
}

impl Link<'_> {
    fn into_html(self, layout: Layout) -> Markup {
        let style = match (layout, self.is_current) {
            (Layout::Desktop, false) => DESKTOP_LINK_STYLE,
            (Layout::Desktop, true) => DESKTOP_CURRENT_LINK_STYLE,
            (Layout::Mobile, false) => MOBILE_LINK_STYLE,
            (Layout::Mobile, true) => MOBILE_CURRENT_LINK_STYLE,
        };

        html!(
            a
                href=(self.url)
                class=(style)
                aria-current=[self.is_current.then_some("page")]
            {
                (self.title)
            }
        )
    }
}

pub struct NavBar<'a> {
    links: Vec<Link<'a>>,
}

impl NavBar<'_> {
    /// Get the navigation bar with the link for `active_endpoint`, if any,
    /// marked as the current page.
    pub fn new(active_endpoint: &str) -> NavBar<'_> {
        let links = [
            (endpoints::DASHBOARD_VIEW, "Dashboard"),
            (endpoints::TRANSACTIONS_VIEW, "Transactions"),
            (endpoints::NEW_TRANSACTION_VIEW, "Add Transaction"),
        ]
        .into_iter()
        .map(|(url, title)| Link {
            url,
            title,
            is_current: active_endpoint == url,
        })
        .collect();

        NavBar { links }
    }

    pub fn into_html(self) -> Markup {
        html!(
            nav class="bg-white border-b border-gray-200 dark:bg-gray-900 dark:border-gray-700"
            {
                div class="max-w-screen-xl flex items-center justify-between mx-auto p-4"
                {
                    a href=(endpoints::ROOT) class=(BRAND_STYLE) { "Finance Tracker" }

                    ul class="hidden lg:flex lg:space-x-8 font-medium"
                    {
                        @for link in self.links.iter().cloned() {
                            li { (link.into_html(Layout::Desktop)) }
                        }
                    }
                }
            }

            nav class="fixed inset-x-0 bottom-0 z-40 lg:hidden"
            {
                ul
                    class="grid grid-cols-3 gap-2 m-4 p-3 rounded-xl border border-gray-200
                    bg-white shadow-lg dark:border-gray-700 dark:bg-gray-900"
                    aria-label="Primary"
                {
                    @for link in self.links {
                        li { (link.into_html(Layout::Mobile)) }
                    }
                }
            }
        )
    }
}
