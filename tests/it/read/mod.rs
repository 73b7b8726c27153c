mod dictionary;
mod nested;
mod primitive;
