//! Account settings, security, storefront and inventory.

use crate::auth::{refresh_identity, use_auth};
use crate::components::common::{Navbar, Toast, use_notice};
use crate::store;
use crate::validation::{self, ABOUT_ME_MAX};
use crate::web::route::AppRoute;
use desync_shared::{
    Identity, InventoryItem, InventorySummary, ItemKind, PaymentMethod, Purchase, Software, date,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsTab {
    Account,
    Security,
    Software,
    Inventory,
}

impl SettingsTab {
    pub const ALL: [SettingsTab; 4] = [
        SettingsTab::Account,
        SettingsTab::Security,
        SettingsTab::Software,
        SettingsTab::Inventory,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SettingsTab::Account => "👤 Account",
            SettingsTab::Security => "🔒 Security",
            SettingsTab::Software => "💻 Software",
            SettingsTab::Inventory => "📦 Inventory",
        }
    }
}

fn item_icon(kind: ItemKind) -> &'static str {
    match kind {
        ItemKind::Invite => "✉️",
        ItemKind::Reward => "🎁",
        ItemKind::Badge => "🏅",
    }
}

#[component]
pub fn SettingsPage(identity: Identity) -> impl IntoView {
    let auth = use_auth();
    let (notice, set_notice) = use_notice();
    let uid = identity.uid;

    let (tab, set_tab) = signal(SettingsTab::Account);
    let (catalogue, set_catalogue) = signal(Vec::<Software>::new());
    let (purchases, set_purchases) = signal(Vec::<Purchase>::new());
    let (inventory, set_inventory) = signal(Vec::<InventoryItem>::new());

    {
        let api = auth.api();
        spawn_local(async move {
            let (software, bought, items) =
                futures::join!(api.software(), api.purchases(uid), api.inventory(uid));
            match software {
                Ok(list) => set_catalogue.set(list),
                Err(e) => tracing::warn!(error = %e, "failed to load software"),
            }
            match bought {
                Ok(list) => set_purchases.set(list),
                Err(e) => tracing::warn!(error = %e, "failed to load purchases"),
            }
            match items {
                Ok(list) => set_inventory.set(list),
                Err(e) => tracing::warn!(error = %e, "failed to load inventory"),
            }
        });
    }

    // --- Account ---
    let (username, set_username) = signal(identity.username.clone());
    let (email, set_email) = signal(identity.email.clone());
    let (about_me, set_about_me) = signal(identity.about_me.clone().unwrap_or_default());
    let (saving, set_saving) = signal(false);

    let save_profile = move |_| {
        let username = username.get_untracked();
        let email = email.get_untracked();
        let about = about_me.get_untracked();
        if let Err(e) = validation::about_me(&about) {
            set_notice.set(Some((e.to_string(), true)));
            return;
        }
        if username.trim().is_empty() || email.trim().is_empty() {
            set_notice.set(Some((validation::ValidationError::MissingFields.to_string(), true)));
            return;
        }
        set_saving.set(true);
        let api = auth.api();
        spawn_local(async move {
            match api.update_profile(uid, username.trim(), email.trim(), &about).await {
                Ok(updated) => {
                    if let Some(user) = updated {
                        refresh_identity(&auth, user);
                    }
                    set_notice.set(Some(("Profile updated successfully!".to_string(), false)));
                }
                Err(e) => {
                    tracing::warn!(uid, error = %e, "profile update failed");
                    set_notice.set(Some(("Failed to update profile. Please try again.".to_string(), true)));
                }
            }
            set_saving.set(false);
        });
    };

    // --- Security ---
    let (current_pw, set_current_pw) = signal(String::new());
    let (new_pw, set_new_pw) = signal(String::new());
    let (confirm_pw, set_confirm_pw) = signal(String::new());

    let update_password = move |_| {
        let result = validation::password_change(
            &current_pw.get_untracked(),
            &new_pw.get_untracked(),
            &confirm_pw.get_untracked(),
        );
        match result {
            Err(e) => set_notice.set(Some((e.to_string(), true))),
            Ok(()) => set_notice.set(Some((
                "Password changes are not available yet.".to_string(),
                true,
            ))),
        }
    };

    // --- Software ---
    let (buying, set_buying) = signal(Option::<Software>::None);
    let (method, set_method) = signal(Option::<PaymentMethod>::None);
    let (processing, set_processing) = signal(false);

    let complete_purchase = move |_| {
        let Some(product) = buying.get_untracked() else {
            return;
        };
        let method = match validation::payment_method(method.get_untracked()) {
            Ok(method) => method,
            Err(e) => {
                set_notice.set(Some((e.to_string(), true)));
                return;
            }
        };
        set_processing.set(true);
        let api = auth.api();
        spawn_local(async move {
            match api.create_purchase(uid, product.id, method).await {
                Ok(()) => {
                    tracing::info!(uid, software_id = product.id, ?method, "purchase completed");
                    match api.purchases(uid).await {
                        Ok(list) => set_purchases.set(list),
                        Err(e) => tracing::warn!(error = %e, "failed to reload purchases"),
                    }
                    set_buying.set(None);
                    set_notice.set(Some(("Purchase completed successfully!".to_string(), false)));
                }
                Err(e) => {
                    tracing::warn!(uid, software_id = product.id, error = %e, "purchase failed");
                    set_notice.set(Some(("Purchase failed. Please try again.".to_string(), true)));
                }
            }
            set_processing.set(false);
        });
    };

    let account_tab = move || view! {
        <h1 class="text-2xl font-bold">"ACCOUNT SETTINGS"</h1>
        <p class="opacity-70 mb-4">"Manage your account information"</p>
        <label class="form-control">
            <span class="label-text">"USERNAME"</span>
            <input class="input input-bordered" prop:value=username on:input=move |ev| set_username.set(event_target_value(&ev)) />
        </label>
        <label class="form-control">
            <span class="label-text">"EMAIL"</span>
            <input type="email" class="input input-bordered" prop:value=email on:input=move |ev| set_email.set(event_target_value(&ev)) />
        </label>
        <label class="form-control">
            <span class="label-text">"ABOUT ME"</span>
            <textarea
                class="textarea textarea-bordered"
                rows=5
                maxlength=ABOUT_ME_MAX
                placeholder="Tell us about yourself..."
                prop:value=about_me
                on:input=move |ev| set_about_me.set(event_target_value(&ev))
            ></textarea>
            <span class="label-text-alt text-right">
                {move || format!("{}/{ABOUT_ME_MAX}", about_me.with(|a| a.chars().count()))}
            </span>
        </label>
        <button class="btn btn-primary mt-4" disabled=saving on:click=save_profile>"SAVE CHANGES"</button>
    };

    let security_tab = move || view! {
        <h1 class="text-2xl font-bold">"SECURITY SETTINGS"</h1>
        <p class="opacity-70 mb-4">"Manage your password and security preferences"</p>
        <label class="form-control">
            <span class="label-text">"CURRENT PASSWORD"</span>
            <input type="password" class="input input-bordered" placeholder="Enter current password"
                prop:value=current_pw on:input=move |ev| set_current_pw.set(event_target_value(&ev)) />
        </label>
        <label class="form-control">
            <span class="label-text">"NEW PASSWORD"</span>
            <input type="password" class="input input-bordered" placeholder="Enter new password"
                prop:value=new_pw on:input=move |ev| set_new_pw.set(event_target_value(&ev)) />
        </label>
        <label class="form-control">
            <span class="label-text">"CONFIRM NEW PASSWORD"</span>
            <input type="password" class="input input-bordered" placeholder="Confirm new password"
                prop:value=confirm_pw on:input=move |ev| set_confirm_pw.set(event_target_value(&ev)) />
        </label>
        <button class="btn btn-primary mt-4" on:click=update_password>"UPDATE PASSWORD"</button>
    };

    let software_tab = move || view! {
        <h1 class="text-2xl font-bold">"SOFTWARE"</h1>
        <p class="opacity-70 mb-4">"Browse and purchase software"</p>
        <div class="grid md:grid-cols-2 gap-4">
            <For
                each=move || catalogue.get()
                key=|s| s.id
                children=move |product| {
                    let id = product.id;
                    let owned = move || purchases.with(|p| store::is_owned(id, p));
                    let to_buy = product.clone();
                    view! {
                        <div class="card bg-base-200">
                            <div class="card-body">
                                <div class="flex justify-between">
                                    <h3 class="card-title">{product.name.clone()}</h3>
                                    <span class="badge">{store::kind_label(product.kind)}</span>
                                </div>
                                <p class="text-sm opacity-80">{product.description.clone()}</p>
                                <ul class="text-sm list-disc list-inside">
                                    {product.features.iter().map(|f| view! { <li>{f.clone()}</li> }).collect_view()}
                                </ul>
                                <div class="flex justify-between items-center mt-2">
                                    <span class="text-xl font-bold">{store::format_price(product.price)}</span>
                                    {move || if owned() {
                                        view! { <span class="badge badge-success">"✓ OWNED"</span> }.into_any()
                                    } else {
                                        let to_buy = to_buy.clone();
                                        view! {
                                            <button class="btn btn-primary btn-sm" on:click=move |_| {
                                                set_method.set(None);
                                                set_buying.set(Some(to_buy.clone()));
                                            }>"BUY NOW"</button>
                                        }.into_any()
                                    }}
                                </div>
                            </div>
                        </div>
                    }
                }
            />
        </div>
        <Show when=move || purchases.with(|p| !p.is_empty())>
            <h3 class="font-bold mt-6 mb-2">"PURCHASE HISTORY"</h3>
            <table class="table table-sm">
                <thead><tr><th>"Product"</th><th>"Date"</th><th>"Method"</th><th>"Amount"</th><th>"Status"</th></tr></thead>
                <tbody>
                    {move || {
                        let list = catalogue.get();
                        purchases.get().into_iter().map(|p| view! {
                            <tr>
                                <td>{store::product_name(p.software_id, &list)}</td>
                                <td>{p.purchase_date.format_date()}</td>
                                <td>{store::payment_label(p.payment_method)}</td>
                                <td>{store::format_price(p.amount)}</td>
                                <td>{store::status_label(p.status)}</td>
                            </tr>
                        }).collect_view()
                    }}
                </tbody>
            </table>
        </Show>
    };

    let inventory_tab = move || view! {
        <h1 class="text-2xl font-bold">"INVENTORY"</h1>
        <p class="opacity-70 mb-4">"Items granted to your account"</p>
        {move || {
            let items = inventory.get();
            if items.is_empty() {
                return view! { <p class="opacity-60">"No items in your inventory yet."</p> }.into_any();
            }
            let now = date::now();
            view! {
                <div class="grid md:grid-cols-3 gap-3">
                    {items.into_iter().map(|item| {
                        let expired = item.expires_at.as_ref().is_some_and(|t| t.is_before(now));
                        view! {
                            <div class=if item.used || expired { "card bg-base-200 opacity-50" } else { "card bg-base-200" }>
                                <div class="card-body p-4">
                                    <div class="text-2xl">{item_icon(item.kind)}</div>
                                    <h4 class="font-bold">{item.name.clone()}</h4>
                                    <p class="text-sm opacity-80">{item.description.clone()}</p>
                                    {item.expires_at.as_ref().map(|t| view! {
                                        <p class="text-xs opacity-60">{format!("Expires: {}", t.format_date())}</p>
                                    })}
                                    {item.used.then(|| view! { <span class="badge badge-ghost">"Used"</span> })}
                                </div>
                            </div>
                        }
                    }).collect_view()}
                </div>
            }
            .into_any()
        }}
        <div class="stats shadow mt-6">
            {move || {
                let summary = inventory.with(|i| InventorySummary::of(i));
                view! {
                    <div class="stat"><div class="stat-title">"Total Items"</div><div class="stat-value">{summary.total}</div></div>
                    <div class="stat"><div class="stat-title">"Invites"</div><div class="stat-value">{summary.invites}</div></div>
                    <div class="stat"><div class="stat-title">"Rewards"</div><div class="stat-value">{summary.rewards}</div></div>
                    <div class="stat"><div class="stat-title">"Badges"</div><div class="stat-value">{summary.badges}</div></div>
                }
            }}
        </div>
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4">
            <Navbar identity=identity active=AppRoute::Settings />
            <Toast notice=notice />
            <div class="grid lg:grid-cols-4 gap-6">
                <ul class="menu bg-base-100 rounded-box shadow h-fit">
                    <li class="menu-title">"SETTINGS"</li>
                    {SettingsTab::ALL
                        .into_iter()
                        .map(|t| view! {
                            <li>
                                <a class=move || if tab.get() == t { "active" } else { "" } on:click=move |_| set_tab.set(t)>
                                    {t.label()}
                                </a>
                            </li>
                        })
                        .collect_view()}
                </ul>
                <div class="lg:col-span-3 card bg-base-100 shadow">
                    <div class="card-body">
                        {move || match tab.get() {
                            SettingsTab::Account => account_tab().into_any(),
                            SettingsTab::Security => security_tab().into_any(),
                            SettingsTab::Software => software_tab().into_any(),
                            SettingsTab::Inventory => inventory_tab().into_any(),
                        }}
                    </div>
                </div>
            </div>

            {move || buying.get().map(|product| view! {
                <div class="modal modal-open" on:click=move |_| set_buying.set(None)>
                    <div class="modal-box" on:click=|ev| ev.stop_propagation()>
                        <h2 class="text-xl font-bold">{format!("Purchase {}", product.name)}</h2>
                        <p class="text-2xl font-bold my-2">{store::format_price(product.price)}</p>
                        <div class="space-y-2">
                            {[PaymentMethod::Crypto, PaymentMethod::Card].into_iter().map(|m| view! {
                                <label class="flex items-center gap-2 cursor-pointer">
                                    <input
                                        type="radio"
                                        name="payment"
                                        class="radio"
                                        prop:checked=move || method.get() == Some(m)
                                        on:change=move |ev| set_method.set(store::parse_payment_method(&event_target_value(&ev)))
                                        value=match m { PaymentMethod::Crypto => "Crypto", PaymentMethod::Card => "Card" }
                                    />
                                    {store::payment_label(m)}
                                </label>
                            }).collect_view()}
                        </div>
                        <div class="modal-action">
                            <button class="btn" on:click=move |_| set_buying.set(None)>"Cancel"</button>
                            <button class="btn btn-primary" disabled=processing on:click=complete_purchase>
                                {move || if processing.get() { "Processing..." } else { "Complete Purchase" }}
                            </button>
                        </div>
                    </div>
                </div>
            })}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_tab_has_a_label() {
        let labels: Vec<&str> = SettingsTab::ALL.iter().map(|t| t.label()).collect();
        assert_eq!(labels.len(), 4);
        assert!(labels[3].ends_with("Inventory"));
    }

    #[test]
    fn test_item_icons_differ_per_kind() {
        assert_ne!(item_icon(ItemKind::Invite), item_icon(ItemKind::Reward));
        assert_ne!(item_icon(ItemKind::Reward), item_icon(ItemKind::Badge));
    }
}
