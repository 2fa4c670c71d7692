pub const QUERY_GET_USER_APP_BY_USERNAME: &str = r#"
SELECT id,username,password_hash,created_at
FROM user_app
WHERE username=$1;
"#;

pub const QUERY_INSERT_USER_APP: &str = r#"
INSERT INTO user_app(username,password_hash,created_at) VALUES($1,$2,$3);
"#;

pub const QUERY_GET_ALL_PETS_USER_ID: &str = r#"
SELECT
    p.id,p.user_app_id,p.name,p.species,p.breed,
    p.birthday,p.weight,p.created_at,p.updated_at
FROM pet AS p
WHERE p.user_app_id=$1
ORDER BY p.name ASC, p.id ASC;
"#;

pub const QUERY_GET_PET_BY_ID: &str = r#"
SELECT
    p.id,p.user_app_id,p.name,p.species,p.breed,
    p.birthday,p.weight,p.created_at,p.updated_at
FROM pet AS p
WHERE p.id=$1;
"#;

pub const QUERY_INSERT_PET: &str = r#"
INSERT INTO pet (
    user_app_id,name,species,breed,
    birthday,weight,created_at,updated_at
) VALUES(
    $1,$2,$3,$4,
    $5,$6,$7,$8
);
"#;

pub const QUERY_UPDATE_PET: &str = r#"
UPDATE pet SET
    name=$3,
    species=$4,
    breed=$5,
    birthday=$6,
    weight=$7,
    updated_at=$8
WHERE id=$1 AND user_app_id=$2;
"#;

pub const QUERY_DELETE_PET: &str = r#"DELETE FROM pet WHERE id=$1 AND user_app_id=$2;"#;

pub const QUERY_GET_PET_EVENTS: &str = r#"
SELECT e.id,e.pet_id,p.user_app_id,e.kind,e.date,e.notes,e.completed,e.created_at
FROM event AS e
INNER JOIN pet AS p ON (p.id = e.pet_id)
WHERE e.pet_id=$1
ORDER BY e.date DESC, e.id DESC;
"#;

pub const QUERY_GET_EVENT_BY_ID: &str = r#"
SELECT e.id,e.pet_id,p.user_app_id,e.kind,e.date,e.notes,e.completed,e.created_at
FROM event AS e
INNER JOIN pet AS p ON (p.id = e.pet_id)
WHERE e.id=$1;
"#;

pub const QUERY_INSERT_EVENT: &str = r#"
INSERT INTO event (
    pet_id,kind,date,notes,completed,created_at
) VALUES($1,$2,$3,$4,$5,$6);
"#;

pub const QUERY_UPDATE_EVENT: &str = r#"
UPDATE event SET kind=$3, date=$4, notes=$5
WHERE id=$1 AND pet_id IN (SELECT id FROM pet WHERE user_app_id=$2);
"#;

pub const QUERY_SET_EVENT_COMPLETED: &str = r#"
UPDATE event SET completed=1
WHERE id=$1 AND pet_id IN (SELECT id FROM pet WHERE user_app_id=$2);
"#;

pub const QUERY_DELETE_EVENT: &str = r#"
DELETE FROM event
WHERE id=$1 AND pet_id IN (SELECT id FROM pet WHERE user_app_id=$2);
"#;

pub const QUERY_GET_PET_GOALS: &str = r#"
SELECT g.id,g.pet_id,p.user_app_id,g.description,g.due_date,g.progress,g.created_at
FROM goal AS g
INNER JOIN pet AS p ON (p.id = g.pet_id)
WHERE g.pet_id=$1
ORDER BY g.progress ASC, g.due_date ASC, g.id ASC;
"#;

pub const QUERY_GET_GOAL_BY_ID: &str = r#"
SELECT g.id,g.pet_id,p.user_app_id,g.description,g.due_date,g.progress,g.created_at
FROM goal AS g
INNER JOIN pet AS p ON (p.id = g.pet_id)
WHERE g.id=$1;
"#;

pub const QUERY_INSERT_GOAL: &str = r#"
INSERT INTO goal (
    pet_id,description,due_date,progress,created_at
) VALUES($1,$2,$3,$4,$5);
"#;

pub const QUERY_SET_GOAL_PROGRESS: &str = r#"
UPDATE goal SET progress=$3
WHERE id=$1 AND pet_id IN (SELECT id FROM pet WHERE user_app_id=$2);
"#;

pub const QUERY_DELETE_GOAL: &str = r#"
DELETE FROM goal
WHERE id=$1 AND pet_id IN (SELECT id FROM pet WHERE user_app_id=$2);
"#;

pub const QUERY_GET_PET_SHOPPING_ITEMS: &str = r#"
SELECT s.id,s.pet_id,p.user_app_id,s.description,s.purchased,s.created_at
FROM shopping_item AS s
INNER JOIN pet AS p ON (p.id = s.pet_id)
WHERE s.pet_id=$1
ORDER BY s.created_at ASC, s.id ASC;
"#;

pub const QUERY_GET_SHOPPING_ITEM_BY_ID: &str = r#"
SELECT s.id,s.pet_id,p.user_app_id,s.description,s.purchased,s.created_at
FROM shopping_item AS s
INNER JOIN pet AS p ON (p.id = s.pet_id)
WHERE s.id=$1;
"#;

pub const QUERY_INSERT_SHOPPING_ITEM: &str = r#"
INSERT INTO shopping_item (
    pet_id,description,purchased,created_at
) VALUES($1,$2,$3,$4);
"#;

pub const QUERY_SET_SHOPPING_ITEM_PURCHASED: &str = r#"
UPDATE shopping_item SET purchased=$3
WHERE id=$1 AND pet_id IN (SELECT id FROM pet WHERE user_app_id=$2);
"#;

pub const QUERY_DELETE_SHOPPING_ITEM: &str = r#"
DELETE FROM shopping_item
WHERE id=$1 AND pet_id IN (SELECT id FROM pet WHERE user_app_id=$2);
"#;

pub const QUERY_GET_AVAILABLE_PRODUCTS: &str = r#"
SELECT id,name,emoji,description,price,stock,image_url
FROM product
WHERE stock > 0
ORDER BY name ASC;
"#;

pub const QUERY_GET_PRODUCT_BY_ID: &str = r#"
SELECT id,name,emoji,description,price,stock,image_url
FROM product
WHERE id=$1;
"#;

pub const QUERY_DECREMENT_PRODUCT_STOCK: &str = r#"
UPDATE product SET stock = stock - $2
WHERE id=$1 AND stock >= $2;
"#;
