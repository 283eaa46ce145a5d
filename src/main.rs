use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use rotina::auth::{AuthClient, SessionContext};
use rotina::avatar::{self, AvatarCustomizer, ClothingStyle, Finalize, HairStyle};
use rotina::backend::{HttpBackend, MemoryBackend};
use rotina::config::BackendConfig;
use rotina::profile::ProfileStore;
use rotina::quiz::{
    self, ActivityLevel, Advance, MultiSelectField, QuizStep, QuizWizard, SpecificGroup,
};
use rotina::screens::{
    DashboardScreen, HomeScreen, LoginOutcome, LoginScreen, PasswordRecoveryScreen,
    RecoveryOutcome, Route, SignupOutcome, SignupScreen, Tab, entry_route,
};

/// Line reader over stdin. EOF ends the program cleanly.
struct Prompt {
    lines: Lines<BufReader<Stdin>>,
}

impl Prompt {
    fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    async fn line(&mut self, label: &str) -> anyhow::Result<String> {
        eprint!("{label}");
        match self.lines.next_line().await? {
            Some(line) => Ok(line.trim().to_string()),
            None => {
                println!("\nAté logo!");
                std::process::exit(0);
            }
        }
    }
}

/// Map a 1-based numeric input to an item of `options`.
fn parse_choice<T: Copy>(input: &str, options: &[T]) -> Option<T> {
    let n: usize = input.parse().ok()?;
    options.get(n.checked_sub(1)?).copied()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    eprintln!("💚 Rotinas Saudáveis v{}", env!("CARGO_PKG_VERSION"));

    let (auth, profiles): (Arc<dyn AuthClient>, Arc<dyn ProfileStore>) =
        match BackendConfig::from_env()? {
            Some(config) => {
                eprintln!("   Backend: {}", config.base_url);
                let backend = Arc::new(HttpBackend::new(config));
                let auth: Arc<dyn AuthClient> = backend.clone();
                let profiles: Arc<dyn ProfileStore> = backend;
                (auth, profiles)
            }
            None => {
                eprintln!(
                    "   Backend: em memória (defina ROTINA_BACKEND_URL para usar o serviço hospedado)"
                );
                let backend = Arc::new(MemoryBackend::new());
                let auth: Arc<dyn AuthClient> = backend.clone();
                let profiles: Arc<dyn ProfileStore> = backend;
                (auth, profiles)
            }
        };

    let ctx = SessionContext::new(Arc::clone(&auth));
    let mut prompt = Prompt::new();
    let mut route = entry_route(&ctx).await;

    loop {
        route = match route {
            Route::Login => run_login(&mut prompt, &auth).await?,
            Route::Signup => run_signup(&mut prompt, &auth).await?,
            Route::PasswordRecovery => run_recovery(&mut prompt, &auth).await?,
            Route::Quiz => run_quiz(&mut prompt, &ctx, &profiles).await?,
            Route::Avatar => run_avatar(&mut prompt, &ctx, &profiles).await?,
            Route::Dashboard => run_dashboard(&mut prompt, &ctx, &profiles).await?,
            Route::Home => run_home(&mut prompt, &ctx, &profiles).await?,
        };
    }
}

async fn run_login(prompt: &mut Prompt, auth: &Arc<dyn AuthClient>) -> anyhow::Result<Route> {
    println!("\n━━ Bem-vindo de volta! ━━");
    println!("Entre para continuar sua jornada saudável");
    println!("(Enter vazio no e-mail: criar conta · \"esqueci\": recuperar senha)");

    let mut screen = LoginScreen::new(Arc::clone(auth));
    screen.email = prompt.line("E-mail: ").await?;
    if screen.email.is_empty() {
        return Ok(Route::Signup);
    }
    if screen.email == "esqueci" {
        return Ok(Route::PasswordRecovery);
    }
    screen.password = prompt.line("Senha: ").await?;

    match screen.submit().await {
        LoginOutcome::Success(_) => {
            println!("✅ Login realizado com sucesso!");
            Ok(Route::Dashboard)
        }
        LoginOutcome::Failed(e) => {
            println!("⚠️  {e}");
            Ok(Route::Login)
        }
        LoginOutcome::Busy => Ok(Route::Login),
    }
}

async fn run_signup(prompt: &mut Prompt, auth: &Arc<dyn AuthClient>) -> anyhow::Result<Route> {
    println!("\n━━ Comece sua jornada ━━");
    println!("Crie sua conta e transforme seus hábitos");
    println!("(Enter vazio no nome: voltar ao login)");

    let mut screen = SignupScreen::new(Arc::clone(auth));
    screen.name = prompt.line("Nome completo: ").await?;
    if screen.name.is_empty() {
        return Ok(Route::Login);
    }
    screen.email = prompt.line("E-mail: ").await?;
    screen.password = prompt.line("Senha: ").await?;
    screen.confirm_password = prompt.line("Confirmar senha: ").await?;

    for (met, text) in screen.password_requirements() {
        println!("  [{}] {text}", if met { "x" } else { " " });
    }

    match screen.submit().await {
        SignupOutcome::Success(_) => {
            println!("✅ Conta criada com sucesso! Redirecionando...");
            Ok(Route::Quiz)
        }
        SignupOutcome::Rejected(e) => {
            println!("⚠️  {e}");
            Ok(Route::Signup)
        }
        SignupOutcome::Failed(e) => {
            println!("⚠️  {e}");
            Ok(Route::Signup)
        }
        SignupOutcome::Busy => Ok(Route::Signup),
    }
}

async fn run_recovery(prompt: &mut Prompt, auth: &Arc<dyn AuthClient>) -> anyhow::Result<Route> {
    println!("\n━━ Recuperar senha ━━");
    println!("Digite seu e-mail para receber o link de recuperação");

    let mut screen = PasswordRecoveryScreen::new(Arc::clone(auth));
    screen.email = prompt.line("E-mail: ").await?;
    if screen.email.is_empty() {
        return Ok(Route::Login);
    }
    match screen.submit().await {
        RecoveryOutcome::Sent => {
            println!("✅ E-mail de recuperação enviado!");
            println!("Verifique seu e-mail para redefinir sua senha");
            Ok(Route::Login)
        }
        RecoveryOutcome::Failed(e) => {
            println!("⚠️  {e}");
            Ok(Route::PasswordRecovery)
        }
        RecoveryOutcome::Busy => Ok(Route::PasswordRecovery),
    }
}

async fn run_quiz(
    prompt: &mut Prompt,
    ctx: &SessionContext,
    profiles: &Arc<dyn ProfileStore>,
) -> anyhow::Result<Route> {
    println!("\n━━ Vamos personalizar sua jornada ━━");
    let mut wizard = QuizWizard::new(ctx.clone(), Arc::clone(profiles));

    loop {
        render_quiz_step(&wizard);
        let input = prompt.line("> ").await?;
        match input.as_str() {
            "" | "p" => match wizard.advance().await {
                Advance::Moved(_) => {}
                Advance::Rejected(e) => println!("⚠️  {e}"),
                Advance::Completed => {
                    println!("✅ Perfil configurado com sucesso!");
                    return Ok(Route::Avatar);
                }
                Advance::Unauthenticated => {
                    println!("⚠️  Usuário não autenticado");
                    return Ok(Route::Login);
                }
                Advance::Failed => println!("⚠️  Erro ao salvar suas preferências"),
                Advance::Busy => {}
            },
            "v" => {
                if !wizard.retreat() {
                    println!("Já estamos na primeira etapa");
                }
            }
            other => apply_quiz_input(&mut wizard, other),
        }
    }
}

fn render_quiz_step(wizard: &QuizWizard) {
    let step = wizard.step();
    let answers = wizard.answers();
    println!("\nEtapa {} de {}", step.index(), QuizStep::TOTAL);
    match step {
        QuizStep::Goals => {
            println!("Quais são seus objetivos principais? (número alterna a seleção)");
            for (i, goal) in quiz::model::PRIMARY_GOAL_OPTIONS.iter().enumerate() {
                let mark = if answers.is_selected(MultiSelectField::PrimaryGoals, goal) {
                    "x"
                } else {
                    " "
                };
                println!("  {:2}. [{mark}] {goal}", i + 1);
            }
        }
        QuizStep::BodyMetrics => {
            println!("Conte-nos sobre você (digite peso altura idade, ex: 70 170 30)");
            println!("  Peso (kg): {}", answers.weight_kg);
            println!("  Altura (cm): {}", answers.height_cm);
            println!("  Idade: {}", answers.age);
        }
        QuizStep::ActivityLevel => {
            println!("Qual seu nível de atividade física atual? (escolha um número)");
            for (i, level) in ActivityLevel::ALL.iter().enumerate() {
                let mark = if answers.activity_level == Some(*level) {
                    "x"
                } else {
                    " "
                };
                println!(
                    "  {}. [{mark}] {}: {}",
                    i + 1,
                    level.label(),
                    level.description()
                );
            }
        }
        QuizStep::HealthRestrictions => {
            println!("Medicamentos e Restrições");
            println!(
                "  Toma algum medicamento regularmente? (m <texto>): {}",
                answers.medications
            );
            println!("  Possui restrições alimentares? (número alterna)");
            for (i, restriction) in quiz::model::DIETARY_RESTRICTION_OPTIONS.iter().enumerate() {
                let mark = if answers.is_selected(MultiSelectField::DietaryRestrictions, restriction)
                {
                    "x"
                } else {
                    " "
                };
                println!("  {}. [{mark}] {restriction}", i + 1);
            }
        }
        QuizStep::PhysicalLimitations => {
            println!("Limitações Físicas (número alterna)");
            for (i, difficulty) in quiz::model::ACTIVITY_DIFFICULTY_OPTIONS.iter().enumerate() {
                let mark = if answers.is_selected(MultiSelectField::ActivityDifficulties, difficulty)
                {
                    "x"
                } else {
                    " "
                };
                println!("  {}. [{mark}] {difficulty}", i + 1);
            }
            let spine = if answers.has_spine_issues { "x" } else { " " };
            println!("  c. [{spine}] Possui problemas na coluna");
            println!(
                "  o <texto>: outros problemas de saúde ({})",
                answers.other_issues
            );
        }
        QuizStep::Preferences => {
            println!("Últimas configurações");
            let notify = if answers.accepts_notifications { "x" } else { " " };
            println!("  n. [{notify}] Aceito receber notificações");
            println!("  Você se identifica com algum grupo específico?");
            for (i, group) in SpecificGroup::ALL.iter().enumerate() {
                let mark = if answers.specific_group == Some(*group) {
                    "x"
                } else {
                    " "
                };
                println!("  {}. [{mark}] {}", i + 1, group.label());
            }
        }
    }
    if step.is_last() {
        println!("(Enter/p: Finalizar · v: Voltar)");
    } else if step.index() == 1 {
        println!("(Enter/p: Próximo)");
    } else {
        println!("(Enter/p: Próximo · v: Voltar)");
    }
}

fn apply_quiz_input(wizard: &mut QuizWizard, input: &str) {
    match wizard.step() {
        QuizStep::Goals => {
            if let Some(goal) = parse_choice(input, &quiz::model::PRIMARY_GOAL_OPTIONS) {
                wizard.toggle(MultiSelectField::PrimaryGoals, goal);
            }
        }
        QuizStep::BodyMetrics => {
            let parts: Vec<&str> = input.split_whitespace().collect();
            if let [weight, height, age] = parts.as_slice() {
                let answers = wizard.answers_mut();
                answers.set_weight_kg(*weight);
                answers.set_height_cm(*height);
                answers.set_age(*age);
            } else {
                println!("Digite os três valores: peso altura idade");
            }
        }
        QuizStep::ActivityLevel => {
            if let Some(level) = parse_choice(input, &ActivityLevel::ALL) {
                wizard.answers_mut().set_activity_level(level);
            }
        }
        QuizStep::HealthRestrictions => {
            if let Some(text) = input.strip_prefix("m ") {
                wizard.answers_mut().set_medications(text.trim());
            } else if let Some(restriction) =
                parse_choice(input, &quiz::model::DIETARY_RESTRICTION_OPTIONS)
            {
                wizard.toggle(MultiSelectField::DietaryRestrictions, restriction);
            }
        }
        QuizStep::PhysicalLimitations => {
            if input == "c" {
                let flag = !wizard.answers().has_spine_issues;
                wizard.answers_mut().set_has_spine_issues(flag);
            } else if let Some(text) = input.strip_prefix("o ") {
                wizard.answers_mut().set_other_issues(text.trim());
            } else if let Some(difficulty) =
                parse_choice(input, &quiz::model::ACTIVITY_DIFFICULTY_OPTIONS)
            {
                wizard.toggle(MultiSelectField::ActivityDifficulties, difficulty);
            }
        }
        QuizStep::Preferences => {
            if input == "n" {
                let flag = !wizard.answers().accepts_notifications;
                wizard.answers_mut().set_accepts_notifications(flag);
            } else if let Some(group) = parse_choice(input, &SpecificGroup::ALL) {
                wizard.answers_mut().set_specific_group(group);
            }
        }
    }
}

async fn run_avatar(
    prompt: &mut Prompt,
    ctx: &SessionContext,
    profiles: &Arc<dyn ProfileStore>,
) -> anyhow::Result<Route> {
    println!("\n━━ Crie seu Avatar ━━");
    println!("Personalize seu personagem que te acompanhará na jornada");
    let mut customizer = AvatarCustomizer::new(ctx.clone(), Arc::clone(profiles));

    loop {
        render_avatar(&customizer);
        let input = prompt.line("> ").await?;
        if input == "f" || input.is_empty() {
            match customizer.finalize().await {
                Finalize::Completed => {
                    println!("✅ Avatar criado com sucesso!");
                    return Ok(Route::Home);
                }
                Finalize::Unauthenticated => {
                    println!("⚠️  Usuário não autenticado");
                    return Ok(Route::Login);
                }
                Finalize::Failed => println!("⚠️  Erro ao salvar avatar"),
                Finalize::Busy => {}
            }
            continue;
        }
        match input.split_once(' ') {
            Some(("p", index)) => {
                if let Some(color) = parse_choice(index, &avatar::model::SKIN_COLORS) {
                    customizer.set_skin_color(color);
                }
            }
            Some(("tc", index)) => {
                if let Some(style) = parse_choice(index, &HairStyle::ALL) {
                    customizer.set_hair_style(style);
                }
            }
            Some(("cc", index)) => {
                if let Some(color) = parse_choice(index, &avatar::model::HAIR_COLORS) {
                    customizer.set_hair_color(color);
                }
            }
            Some(("tr", index)) => {
                if let Some(style) = parse_choice(index, &ClothingStyle::ALL) {
                    customizer.set_clothing_style(style);
                }
            }
            Some(("cr", index)) => {
                if let Some(color) = parse_choice(index, &avatar::model::CLOTHING_COLORS) {
                    customizer.set_clothing_color(color);
                }
            }
            Some(("a", id)) => {
                if !customizer.toggle_accessory(id.trim()) {
                    println!("Acessório bloqueado ou desconhecido");
                }
            }
            _ => println!("Comando não reconhecido"),
        }
    }
}

fn render_avatar(customizer: &AvatarCustomizer) {
    let appearance = customizer.appearance();
    println!();
    println!("  Cor da pele: {}", appearance.skin_color);
    println!(
        "  Cabelo: {} ({})",
        appearance.hair_style.label(),
        appearance.hair_color
    );
    println!(
        "  Roupa: {} ({})",
        appearance.clothing_style.label(),
        appearance.clothing_color
    );
    let accessories: Vec<&str> = appearance
        .accessories
        .iter()
        .map(|id| {
            avatar::model::accessory(id)
                .map(|a| a.name)
                .unwrap_or(id.as_str())
        })
        .collect();
    println!(
        "  Acessórios: {}",
        if accessories.is_empty() {
            "nenhum".to_string()
        } else {
            accessories.join(", ")
        }
    );
    println!("Comandos:");
    println!("  p <1-6>   cor da pele: {}", avatar::model::SKIN_COLORS.join(" "));
    println!(
        "  tc <1-4>  tipo de cabelo: {}",
        HairStyle::ALL.map(|s| s.label()).join(" / ")
    );
    println!("  cc <1-6>  cor do cabelo: {}", avatar::model::HAIR_COLORS.join(" "));
    println!(
        "  tr <1-4>  estilo de roupa: {}",
        ClothingStyle::ALL.map(|s| s.label()).join(" / ")
    );
    println!("  cr <1-6>  cor da roupa: {}", avatar::model::CLOTHING_COLORS.join(" "));
    for option in avatar::model::ACCESSORY_OPTIONS {
        let lock = if option.premium { " (Premium, bloqueado)" } else { "" };
        println!("  a {:8}  {}{lock}", option.id, option.name);
    }
    println!("  f (ou Enter): Finalizar e Começar");
}

async fn run_dashboard(
    prompt: &mut Prompt,
    ctx: &SessionContext,
    profiles: &Arc<dyn ProfileStore>,
) -> anyhow::Result<Route> {
    let screen = match DashboardScreen::mount(ctx, profiles).await {
        Ok(screen) => screen,
        Err(redirect) => return Ok(redirect),
    };
    println!("\n━━ Rotinas Saudáveis ━━");
    println!("Olá, {}!", screen.greeting_name());
    println!("  Perfil: configure seu avatar e preferências");
    println!("  Objetivos: defina e acompanhe suas metas");
    println!("  Conquistas: veja suas conquistas e níveis");
    loop {
        let input = prompt
            .line("(h: telas principais · sair: encerrar sessão · q: fechar) > ")
            .await?;
        match input.as_str() {
            "h" => return Ok(Route::Home),
            "sair" => match screen.sign_out(ctx).await {
                Ok(()) => {
                    println!("✅ Logout realizado com sucesso!");
                    return Ok(Route::Login);
                }
                Err(_) => println!("⚠️  Erro ao fazer logout"),
            },
            "q" => {
                println!("Até logo!");
                std::process::exit(0);
            }
            _ => {}
        }
    }
}

async fn run_home(
    prompt: &mut Prompt,
    ctx: &SessionContext,
    profiles: &Arc<dyn ProfileStore>,
) -> anyhow::Result<Route> {
    let mut screen = match HomeScreen::mount(ctx, profiles).await {
        Ok(screen) => screen,
        Err(redirect) => return Ok(redirect),
    };
    loop {
        println!();
        for (i, tab) in Tab::ALL.iter().enumerate() {
            let mark = if *tab == screen.tab() { "●" } else { "○" };
            println!("  {}. {mark} {}", i + 1, tab.label());
        }
        render_tab(&screen);
        let input = prompt
            .line("(número: trocar de aba · d: visão geral · q: fechar) > ")
            .await?;
        match input.as_str() {
            "d" => return Ok(Route::Dashboard),
            "q" => {
                println!("Até logo!");
                std::process::exit(0);
            }
            other => {
                if let Some(tab) = parse_choice(other, &Tab::ALL) {
                    screen.select_tab(tab);
                }
            }
        }
    }
}

fn render_tab(screen: &HomeScreen) {
    match screen.tab() {
        Tab::Today => println!("Seus hábitos de hoje aparecem aqui."),
        Tab::Habits => println!("Gerencie seus hábitos e metas."),
        Tab::Community => println!("Novidades da comunidade."),
        Tab::Reports => println!("Relatórios de progresso."),
        Tab::Profile => println!("Perfil de {}.", screen.session().email),
    }
}
