use restaurant_list_api::infra::{config, telemetry};
use restaurant_list_api::StorageGateway;

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight -- [--memory] [--seed]\n\
         \n\
         Checks that the configured store is reachable and the schema can be created.\n\
         \n\
           --memory   use a throwaway in-memory store instead of DATABASE_URL\n\
           --seed     also insert the sample restaurants if the table is empty\n\
         \n\
         Reads env vars (or .env):\n\
           DATABASE_URL, DATABASE_MAX_CONNECTIONS, BIND_ADDR, CORS_ALLOWED_ORIGINS\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    config::load_dotenv();
    telemetry::init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }
    let in_memory = args.iter().any(|a| a == "--memory");
    let seed = args.iter().any(|a| a == "--seed");

    println!("> Preflight:");
    println!("  BIND_ADDR={}", config::bind_addr());
    println!("  CORS_ALLOWED_ORIGINS={}", config::cors_allowed_origins().join(","));

    let gateway = if in_memory {
        println!("  DATABASE_URL=<in-memory>");
        StorageGateway::connect_in_memory().await?
    } else {
        let url = config::database_url();
        println!("  DATABASE_URL={}", url);
        StorageGateway::connect(&url, config::max_connections())
            .await
            .map_err(|e| anyhow::anyhow!("Store is unreachable at {}: {}", url, e))?
    };

    gateway.ping().await?;
    println!("  Store is reachable.");

    gateway.initialize_schema().await?;
    println!("  Schema is present.");

    if seed {
        let inserted = gateway.seed_if_empty().await?;
        println!("  Seeded {} sample restaurant(s).", inserted);
    }

    println!("  Restaurants stored: {}", gateway.count().await?);
    gateway.close().await;

    println!("> Preflight OK.");
    Ok(())
}
