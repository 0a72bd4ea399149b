use crate::components::common::{Avatar, Navbar, RoleBadge};
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use desync_shared::Identity;
use leptos::prelude::*;

const DISCORD_URL: &str = "https://discord.gg/desync";

#[component]
pub fn DashboardPage(identity: Identity) -> impl IntoView {
    let router = use_router();

    view! {
        <div class="min-h-screen bg-base-200 p-4">
            <Navbar identity=identity.clone() active=AppRoute::Dashboard />

            <div class="grid lg:grid-cols-3 gap-6">
                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body">
                        <div class="flex items-center gap-3">
                            <Avatar username=identity.username.clone() />
                            <div>
                                <h1 class="text-2xl font-bold">{identity.username.clone()}</h1>
                                <RoleBadge role=identity.role() />
                            </div>
                        </div>
                        <div class="stats stats-vertical shadow mt-4">
                            <div class="stat">
                                <div class="stat-title">"USER ID"</div>
                                <div class="stat-value text-lg">{format!("#{}", identity.uid)}</div>
                            </div>
                            <div class="stat">
                                <div class="stat-title">"JOINED"</div>
                                <div class="stat-value text-lg">{identity.join_date.format_date_time()}</div>
                            </div>
                            <div class="stat">
                                <div class="stat-title">"LAST SEEN"</div>
                                <div class="stat-value text-lg">{identity.last_seen.format_date_time()}</div>
                            </div>
                        </div>
                        <div class="flex justify-between mt-2">
                            <span class="opacity-70">"EMAIL"</span>
                            <span>{identity.email.clone()}</span>
                        </div>
                        <div class="flex justify-between">
                            <span class="opacity-70">"STATUS"</span>
                            <span class="text-success">"● ACTIVE"</span>
                        </div>
                    </div>
                </div>

                <div class="lg:col-span-2 space-y-4">
                    <h2 class="text-2xl font-bold">"WELCOME TO DESYNC"</h2>
                    <p class="opacity-80">
                        "Your account is active and ready to use. Download the latest version of DESYNC to get started."
                    </p>
                    <div class="grid md:grid-cols-3 gap-4">
                        <div class="card bg-base-100 shadow">
                            <div class="card-body items-center text-center">
                                <div class="text-3xl">"⬇️"</div>
                                <h3 class="card-title">"Download Client"</h3>
                                <p class="text-sm opacity-70">"Get the latest version of DESYNC"</p>
                                <button class="btn btn-primary btn-sm" on:click=move |_| router.navigate_to_route(AppRoute::Settings)>
                                    "DOWNLOAD"
                                </button>
                            </div>
                        </div>
                        <div class="card bg-base-100 shadow">
                            <div class="card-body items-center text-center">
                                <div class="text-3xl">"📖"</div>
                                <h3 class="card-title">"Community"</h3>
                                <p class="text-sm opacity-70">"Guides, configs and help on the forum"</p>
                                <button class="btn btn-secondary btn-sm" on:click=move |_| router.navigate_to_route(AppRoute::Forum)>
                                    "OPEN FORUM"
                                </button>
                            </div>
                        </div>
                        <div class="card bg-base-100 shadow">
                            <div class="card-body items-center text-center">
                                <div class="text-3xl">"💬"</div>
                                <h3 class="card-title">"Join Discord"</h3>
                                <p class="text-sm opacity-70">"Connect with the community and get support"</p>
                                <a class="btn btn-secondary btn-sm" href=DISCORD_URL target="_blank" rel="noopener noreferrer">
                                    "JOIN NOW"
                                </a>
                            </div>
                        </div>
                    </div>
                </div>
            </div>
        </div>
    }
}
