use crate::web::router::{Link, use_router};
use crate::web::route::AppRoute;
use leptos::prelude::*;

const FEATURES: [(&str, &str); 6] = [
    (
        "Movement Perfection",
        "Master strafe jumping, bunny hopping and advanced movement with precision assistance.",
    ),
    (
        "Stable Performance",
        "Engineered for reliability so nothing gets in the way of your game.",
    ),
    (
        "Secure & Private",
        "Your account stays protected and your data stays yours.",
    ),
    (
        "24/7 Support",
        "An active community and support team around the clock.",
    ),
    (
        "Easy Setup",
        "No complex configuration needed. Get going in seconds.",
    ),
    (
        "Premium Quality",
        "Top-tier movement tooling at an accessible price.",
    ),
];

#[component]
pub fn LandingPage() -> impl IntoView {
    let router = use_router();
    let get_started = move |_| router.navigate_to_route(AppRoute::Auth);

    view! {
        <div class="min-h-screen bg-base-200">
            <div class="navbar bg-base-100 shadow">
                <div class="flex-1 gap-2">
                    <Link to="/" class="btn btn-ghost text-xl">"DESYNC"</Link>
                    <a href="#features" class="btn btn-ghost btn-sm">"FEATURES"</a>
                    <a href="https://discord.gg/desync" target="_blank" rel="noopener noreferrer" class="btn btn-ghost btn-sm">
                        "DISCORD"
                    </a>
                </div>
                <div class="flex-none gap-2">
                    <Link to="/auth" class="btn btn-ghost btn-sm">"Log in"</Link>
                    <Link to="/auth" class="btn btn-primary btn-sm">"Register"</Link>
                </div>
            </div>

            <div class="hero py-24">
                <div class="hero-content text-center flex-col">
                    <h1 class="text-5xl font-bold">"DESYNC"</h1>
                    <p class="text-lg opacity-80">"DOMINATE MOVEMENT WITH DESYNC.CC"</p>
                    <button class="btn btn-primary" on:click=get_started>"GET DESYNC"</button>
                </div>
            </div>

            <section id="features" class="max-w-5xl mx-auto px-4 pb-16">
                <h2 class="text-3xl font-bold text-center mb-2">"Why Choose Desync?"</h2>
                <p class="text-center opacity-70 mb-8">
                    "Desync is engineered to perfect every aspect of your movement"
                </p>
                <div class="grid md:grid-cols-3 gap-4">
                    {FEATURES
                        .iter()
                        .map(|(title, text)| view! {
                            <div class="card bg-base-100 shadow">
                                <div class="card-body">
                                    <h3 class="card-title">{*title}</h3>
                                    <p class="opacity-80">{*text}</p>
                                </div>
                            </div>
                        })
                        .collect_view()}
                </div>
            </section>

            <section class="text-center pb-24 space-y-3">
                <p class="text-sm tracking-widest opacity-70">"STARTING AT $3.00/MONTH"</p>
                <h2 class="text-4xl font-bold">"COUNTER STRIKE 2"</h2>
                <button class="btn btn-primary" on:click=get_started>"BUY NOW"</button>
            </section>
        </div>
    }
}
