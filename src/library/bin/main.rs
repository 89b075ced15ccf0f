use tracing::{info, warn};
use branch_lending::books::factory::BookBuilder;
use branch_lending::branch::domain::BranchService;
use branch_lending::branch::dto::BranchDto;
use branch_lending::branch::factory::create_branch_service;
use branch_lending::checkout::domain::model::LoanToken;
use branch_lending::catalog::factory::create_catalog_service;
use branch_lending::core::domain::Configuration;
use branch_lending::core::library::LibraryResult;
use branch_lending::gateway::GatewayPublisherVia;
use branch_lending::patrons::domain::model::Patron;
use branch_lending::patrons::dto::PatronDto;
use branch_lending::recommend::domain::RecommendationKind;
use branch_lending::recommend::factory::create_recommendation_strategy;
use branch_lending::utils::logs::setup_tracing;

fn return_loan(branch: &mut dyn BranchService, token: Option<LoanToken>) {
    match token {
        Some(token) => {
            if let Err(err) = branch.return_book(&token) {
                warn!("Return refused: {}", err);
            }
        }
        None => warn!("Token is invalid"),
    }
}

fn main() -> LibraryResult<()> {
    setup_tracing();

    let config = Configuration::new();
    let via = GatewayPublisherVia::Logs;
    let mut catalog = create_catalog_service(via);
    let mut central = create_branch_service(&config, BranchDto::new(54321, "Central Branch", "Vijayawada"), via);
    let mut overseas = create_branch_service(&config, BranchDto::new(54322, "Overseas Branch", "Houston"), via);
    let mut regional = create_branch_service(&config, BranchDto::new(54323, "Regional Branch", "Ranchi"), via);

    let clean_code = catalog.add_book(BookBuilder::new().isbn(1234567890).title("Clean Code")
        .author("Akhilesh").publication_year(2005).genre("Education"))?;
    let algorithms = catalog.add_book(BookBuilder::new().isbn(1234567891).title("Data Structures and Algorithms")
        .author("Lokesh").publication_year(2007).genre("Educatiom"))?;
    let patterns = catalog.add_book(BookBuilder::new().isbn(1234567892).title("Design Patterns")
        .author("Rahul").publication_year(2009).genre("Education"))?;
    let java = catalog.add_book(BookBuilder::new().isbn(1234567893).title("Java Programming")
        .author("Sachin").publication_year(2011).genre("Education"))?;
    let system_design = catalog.add_book(BookBuilder::new().isbn(1234567894).title("System Design")
        .author("Akhilesh").publication_year(2013).genre("Education"))?;
    if let Err(err) = catalog.add_book(BookBuilder::new().isbn(1234567895).title("Data Science")
        .author("Lokesh").genre("Education")) {
        warn!("Data Science was not catalogued: {}", err);
    }
    let machine_learning = catalog.add_book(BookBuilder::new().isbn(1234567896).title("Machine Learning")
        .author("Rahul").publication_year(2015))?;
    info!("Catalogued {} books", catalog.books().len());

    central.add_book(&clean_code, 2);
    central.add_book(&algorithms, 8);
    central.add_book(&patterns, 3);
    central.add_book(&java, 7);
    central.remove_book(&patterns);
    central.update_quantity(&clean_code, 1);

    overseas.add_book(&algorithms, 5);
    overseas.add_book(&patterns, 7);
    overseas.add_book(&java, 4);
    overseas.add_book(&system_design, 6);
    overseas.remove_book(&java);
    overseas.update_quantity(&patterns, 10);

    regional.add_book(&clean_code, 3);
    regional.add_book(&patterns, 5);
    regional.add_book(&system_design, 7);
    regional.add_book(&machine_learning, 1);

    let akhil = Patron::new(1, "Akhil", "Vijayawada", "9999999999");
    let loki = Patron::new(2, "Loki", "Houston", "9999999998");
    let dhoni = Patron::new(3, "Dhoni", "Ranchi", "9999999997");

    let first = central.checkout_book(&clean_code, &akhil).ok();
    let second = central.checkout_book(&clean_code, &loki).ok();
    let third = central.checkout_book(&clean_code, &dhoni).ok();

    return_loan(central.as_mut(), first);

    let fourth = central.checkout_book(&clean_code, &akhil).ok();

    return_loan(central.as_mut(), second);
    return_loan(central.as_mut(), fourth);
    return_loan(central.as_mut(), third);

    central.borrowed_report();
    central.inventory_report();

    if let Err(err) = central.transfer_book(&clean_code, overseas.as_mut(), 3) {
        warn!("Transfer refused: {}", err);
    }
    if let Err(err) = regional.transfer_book(&clean_code, overseas.as_mut(), 2) {
        warn!("Transfer refused: {}", err);
    }

    central.inventory_report();
    overseas.inventory_report();

    central.search_book("Data Structures and Algorithms");
    central.search_in_branch(&system_design, overseas.as_ref());

    for patron in [&dhoni, &loki] {
        if let Err(err) = regional.checkout_book(&machine_learning, patron) {
            warn!("Checkout refused: {}", err);
        }
    }
    loki.unsubscribe(&machine_learning, regional.as_mut());

    central.recommend_books(&akhil, create_recommendation_strategy(RecommendationKind::Author).as_ref());
    regional.recommend_books(&akhil, create_recommendation_strategy(RecommendationKind::Genre).as_ref());
    central.recommend_books(&akhil, create_recommendation_strategy(RecommendationKind::Title).as_ref());

    for patron in [&akhil, &loki, &dhoni] {
        let dto = PatronDto::from(patron);
        info!("Patron: {} Borrowed: {:?} History: {:?} Notifications: {}",
              dto.name, dto.borrowed, dto.history, patron.notifications().len());
    }
    Ok(())
}
