//! Sample products for the shop catalog

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

struct SampleProduct {
    name: &'static str,
    emoji: &'static str,
    description: &'static str,
    price: Decimal,
    stock: u32,
}

const SAMPLE_PRODUCTS: [SampleProduct; 15] = [
    SampleProduct {
        name: "Ração Premium Cães Adultos",
        emoji: "🐶",
        description: "Pacote de 10kg, sabor carne e vegetais.",
        price: dec!(150.00),
        stock: 50,
    },
    SampleProduct {
        name: "Ração Premium Gatos Adultos",
        emoji: "🐱",
        description: "Pacote de 5kg, sabor salmão.",
        price: dec!(120.00),
        stock: 40,
    },
    SampleProduct {
        name: "Coleira de Couro",
        emoji: "🏷️",
        description: "Coleira de couro marrom, tamanho M.",
        price: dec!(45.50),
        stock: 30,
    },
    SampleProduct {
        name: "Arranhador Torre para Gatos",
        emoji: "🗼",
        description: "Arranhador alto com 3 plataformas.",
        price: dec!(220.00),
        stock: 15,
    },
    SampleProduct {
        name: "Bolinha de Tênis (Pacote com 3)",
        emoji: "🎾",
        description: "Bolinhas resistentes para cães.",
        price: dec!(25.00),
        stock: 100,
    },
    SampleProduct {
        name: "Cama Almofadada",
        emoji: "🛌",
        description: "Cama super macia, lavável, tamanho G.",
        price: dec!(180.00),
        stock: 20,
    },
    SampleProduct {
        name: "Roda de Exercício para Hamster",
        emoji: "🐹",
        description: "Roda silenciosa para gaiolas.",
        price: dec!(35.00),
        stock: 50,
    },
    SampleProduct {
        name: "Aquário 20 Litros",
        emoji: "🐠",
        description: "Kit aquário completo com filtro e luz.",
        price: dec!(300.00),
        stock: 10,
    },
    SampleProduct {
        name: "Petisco Dental Care",
        emoji: "🦴",
        description: "Pacote de petiscos para saúde bucal.",
        price: dec!(40.00),
        stock: 70,
    },
    SampleProduct {
        name: "Gaiola para Calopsita",
        emoji: "🦜",
        description: "Gaiola espaçosa com poleiros e comedouros.",
        price: dec!(250.00),
        stock: 12,
    },
    SampleProduct {
        name: "Shampoo Hipoalergênico",
        emoji: "🧴",
        description: "Shampoo suave para pets de pele sensível.",
        price: dec!(55.00),
        stock: 40,
    },
    SampleProduct {
        name: "Caixa de Transporte N°3",
        emoji: "✈️",
        description: "Caixa padrão IATA para viagens aéreas.",
        price: dec!(190.00),
        stock: 8,
    },
    SampleProduct {
        name: "Fonte de Água para Gatos",
        emoji: "💧",
        description: "Fonte bivolt que estimula o gato a beber água.",
        price: dec!(160.00),
        stock: 25,
    },
    SampleProduct {
        name: "Roupinha de Inverno (Moletom)",
        emoji: "🧥",
        description: "Moletom cinza, tamanho P.",
        price: dec!(65.00),
        stock: 30,
    },
    SampleProduct {
        name: "Areia Higiênica Sílica",
        emoji: "🚽",
        description: "Pacote de 1.8kg, alta absorção.",
        price: dec!(70.00),
        stock: 50,
    },
];

/// Deletes every product and inserts the sample catalog in one transaction.
/// Returns how many products were inserted.
pub async fn replace_catalog(db_pool: &sqlx::SqlitePool) -> anyhow::Result<usize> {
    let mut transaction = db_pool.begin().await?;

    sqlx::query("DELETE FROM product;")
        .execute(&mut *transaction)
        .await?;

    for product in SAMPLE_PRODUCTS.iter() {
        sqlx::query(
            "INSERT INTO product(name,emoji,description,price,stock,image_url) VALUES($1,$2,$3,$4,$5,NULL);",
        )
        .bind(product.name)
        .bind(product.emoji)
        .bind(product.description)
        .bind(product.price.round_dp(2).to_string())
        .bind(product.stock)
        .execute(&mut *transaction)
        .await?;
    }

    transaction.commit().await?;

    Ok(SAMPLE_PRODUCTS.len())
}
